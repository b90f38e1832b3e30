use scopehint_core::Position;

/// Split `path[:line[:column]]` into the path and a 0-based position.
///
/// Line and column are 1-based on the command line; a missing column means
/// the start of the line.
pub fn parse_filepath_with_position(filepath_arg: &str) -> (String, Option<Position>) {
    let mut parts = filepath_arg.rsplitn(3, ':');
    let last = parts.next().unwrap_or_default();
    let middle = parts.next();
    let first = parts.next();

    match (first, middle, last.parse::<u32>()) {
        (Some(path), Some(line), Ok(column)) => match line.parse::<u32>() {
            Ok(line) => (path.to_string(), Some(to_position(line, column))),
            // `dir:name.js:3` style paths: only the last part is numeric
            Err(_) => (format!("{path}:{line}"), Some(to_position(column, 1))),
        },
        (None, Some(path), Ok(line)) => (path.to_string(), Some(to_position(line, 1))),
        _ => (filepath_arg.to_string(), None),
    }
}

fn to_position(line: u32, column: u32) -> Position {
    // Convert 1-based to 0-based
    Position::new(line.saturating_sub(1), column.saturating_sub(1))
}
