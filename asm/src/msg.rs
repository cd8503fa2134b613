use color_print::cprintln;

/// Print an error with the source location and offending line.
pub fn diag(msg: &str, path: &str, line_no: usize, raw: &str) {
    cprintln!("<red,bold>error</>: {}", msg);
    cprintln!("     <blue>--></> <underline>{}:{}</>", path, line_no);
    cprintln!("      <blue>|</>");
    cprintln!(" <blue>{:>4} |</> {}", line_no, raw);
    cprintln!("      <blue>|</>");
}

/// Print an error with no source location (I/O and the like).
pub fn fail(msg: &str) {
    cprintln!("<red,bold>error</>: {}", msg);
}
