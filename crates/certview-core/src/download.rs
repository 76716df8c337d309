//! Local file naming for downloaded certificate images.

/// File name for a downloaded certificate image: the event name with each
/// whitespace run replaced by `_`, suffixed `_Certificate.png`.
///
/// The `.png` extension is fixed regardless of the served content type so
/// that the file opens with an image viewer. Path separators become `_` so
/// the name always stays inside the target directory.
pub fn download_file_name(event: &str) -> String {
    let mut name = String::with_capacity(event.len() + 16);
    let mut in_whitespace = false;
    for c in event.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                name.push('_');
            }
            in_whitespace = true;
        } else if c == '/' || c == '\\' {
            name.push('_');
            in_whitespace = false;
        } else {
            name.push(c);
            in_whitespace = false;
        }
    }
    name.push_str("_Certificate.png");
    name
}
