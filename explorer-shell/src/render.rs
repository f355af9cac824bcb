use colored::Colorize;
use file_explorer_core::{format_file_time, print_size, sanitize_user_path, FileInfo, FileType};

const HEADERS: [&str; 4] = ["Name", "Type", "Size", "Last Modified"];

fn size_cell(file: &FileInfo) -> String {
    match file.file_type {
        FileType::Directory => match file.dir_total_size {
            Some(total) => print_size(total),
            None => "-".to_string(),
        },
        _ => file.size.to_string(),
    }
}

/// Renders a listing as an aligned table.
pub fn listing(files: &[FileInfo]) -> String {
    let rows: Vec<[String; 4]> = files
        .iter()
        .map(|file| {
            [
                file.name.clone(),
                file.file_type.to_string(),
                size_cell(file),
                format_file_time(file.modify_time.as_ref()),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header = HEADERS
        .iter()
        .zip(widths)
        .map(|(title, width)| format!("{title:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(&format!("{}\n", header.bold().underline()));

    for (row, file) in rows.iter().zip(files) {
        let name = format!("{:<width$}", row[0], width = widths[0]);
        let name = match file.file_type {
            FileType::Directory => name.blue().bold().to_string(),
            FileType::File => name.yellow().to_string(),
            FileType::Unknown => name,
        };
        out.push_str(&format!(
            "{name}  {:<w1$}  {:>w2$}  {}\n",
            row[1],
            row[2],
            row[3],
            w1 = widths[1],
            w2 = widths[2],
        ));
    }
    out
}

pub fn stat(info: &FileInfo) -> String {
    let size = match (info.file_type, info.dir_total_size) {
        (FileType::Directory, Some(total)) => format!("{total} bytes ({})", print_size(total)),
        _ => format!("{} bytes", info.size),
    };
    format!(
        "Name: {}\nPath: {}\nType: {}\nSize: {}\nLast Modified: {}\nCreated: {}\nLast Accessed: {}\n",
        info.name,
        sanitize_user_path(&info.path),
        info.file_type,
        size,
        format_file_time(info.modify_time.as_ref()),
        format_file_time(info.create_time.as_ref()),
        format_file_time(info.access_time.as_ref()),
    )
}

pub fn search_results(files: &[FileInfo]) -> String {
    if files.is_empty() {
        return "No files found.\n".to_string();
    }
    files
        .iter()
        .map(|file| format!("{}\n", sanitize_user_path(&file.path)))
        .collect()
}

pub fn disk_usage(bytes: u64) -> String {
    format!("Size: {bytes} bytes ({})\n", print_size(bytes))
}
