/// Maps a model-reported image mime type to an output file extension.
///
/// Unknown types fall back to `.png`, matching the most common payload.
pub fn extension_for(mime_type: &str) -> &'static str {
    match mime_type {
        "image/png" => ".png",
        "image/jpeg" | "image/jpg" => ".jpg",
        "image/webp" => ".webp",
        "image/gif" => ".gif",
        other => {
            tracing::warn!("Unrecognized image mime type '{}', falling back to .png", other);
            ".png"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png() {
        assert_eq!(extension_for("image/png"), ".png");
    }

    #[test]
    fn test_jpeg_variants() {
        assert_eq!(extension_for("image/jpeg"), ".jpg");
        assert_eq!(extension_for("image/jpg"), ".jpg");
    }

    #[test]
    fn test_webp() {
        assert_eq!(extension_for("image/webp"), ".webp");
    }

    #[test]
    fn test_gif() {
        assert_eq!(extension_for("image/gif"), ".gif");
    }

    #[test]
    fn test_unknown_falls_back_to_png() {
        assert_eq!(extension_for("application/octet-stream"), ".png");
        assert_eq!(extension_for(""), ".png");
    }
}
