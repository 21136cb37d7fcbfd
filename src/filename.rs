//! Best-effort artist/title guess from a bare file name.

/// Split a path into `(artist, title)` using `Artist - Title.ext` or
/// `Artist_Title.ext`. Falls back to the whole stem as the title.
///
/// Both `/` and `\` are treated as directory separators regardless of the
/// host, so Windows paths coming from a GUI caller parse the same way.
pub fn parse(path: &str) -> (Option<String>, String) {
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let stem = match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    };

    if let Some((artist, title)) = stem.split_once(" - ") {
        return (Some(artist.trim().to_string()), title.trim().to_string());
    }
    if let Some((artist, title)) = stem.split_once('_') {
        return (Some(artist.trim().to_string()), title.trim().to_string());
    }
    (None, stem.trim().to_string())
}
