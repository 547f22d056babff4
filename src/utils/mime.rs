//! MIME type detection utilities

/// Content type for an image upload, derived from the filename extension.
///
/// Matching is case-insensitive; `jpg` maps to `image/jpeg` and anything
/// unrecognized (or no extension at all) defaults to `image/jpeg`.
pub fn image_mime_for_filename(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        // jpeg, jpg and everything unrecognized
        _ => "image/jpeg",
    }
}

/// Guess MIME by inspecting bytes (magic numbers)
pub fn guess_mime_from_bytes(bytes: &[u8]) -> Option<String> {
    infer::get(bytes).map(|k| k.mime_type().to_string())
}

/// Guess MIME by file path (extension-based)
pub fn guess_mime_from_path(path: &str) -> Option<String> {
    mime_guess::from_path(path)
        .first_raw()
        .map(|s| s.to_string())
}

/// Combined guess: prefer bytes, fall back to extension, otherwise octet-stream
pub fn guess_mime(bytes: Option<&[u8]>, path: Option<&str>) -> String {
    if let Some(b) = bytes
        && let Some(m) = guess_mime_from_bytes(b)
    {
        return m;
    }
    if let Some(p) = path
        && let Some(m) = guess_mime_from_path(p)
    {
        return m;
    }
    "application/octet-stream".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_mime_is_case_insensitive_with_jpeg_default() {
        assert_eq!(image_mime_for_filename("photo.JPG"), "image/jpeg");
        assert_eq!(image_mime_for_filename("photo.png"), "image/png");
        assert_eq!(image_mime_for_filename("photo.xyz"), "image/jpeg");
        assert_eq!(image_mime_for_filename("photo.jpeg"), "image/jpeg");
        assert_eq!(image_mime_for_filename("archive.tar.WEBP"), "image/webp");
        assert_eq!(image_mime_for_filename("noext"), "image/jpeg");
    }

    #[test]
    fn guess_prefers_magic_bytes() {
        let png_header = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(guess_mime(Some(&png_header[..]), Some("x.gif")), "image/png");
        assert_eq!(guess_mime(Some(&[0u8; 2][..]), Some("x.gif")), "image/gif");
        assert_eq!(guess_mime(None, None), "application/octet-stream");
    }
}
