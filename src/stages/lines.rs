/// Split raw text into lines on `'\n'`.
///
/// Nothing is trimmed and empty lines are kept, including a leading or
/// trailing one, so the result always has one more line than the text has
/// newlines. An empty string yields a single empty line. A `'\r'` before the
/// newline stays part of its line.
///
/// ```
/// use linebeam::stages::lines::read_lines;
///
/// assert_eq!(read_lines("\na=1\n"), vec!["", "a=1", ""]);
/// assert_eq!(read_lines(""), vec![""]);
/// ```
#[must_use]
pub fn read_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_owned).collect()
}
