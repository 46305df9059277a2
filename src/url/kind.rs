use std::fmt;
use url::Url;

/// Media type bucket that tells the content service how to read a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// Web page or anything without a recognised extension
    Html,
    Pdf,
    Jpeg,
    Png,
}

impl ContentKind {
    /// MIME type declared to the content service
    pub fn mime_type(&self) -> &'static str {
        match self {
            // Page content is handed over as text, not markup
            Self::Html => "text/plain",
            Self::Pdf => "application/pdf",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Html => "html",
            Self::Pdf => "pdf",
            Self::Jpeg => "jpeg",
            Self::Png => "png",
        };
        f.write_str(name)
    }
}

/// Infers the content kind of a URL from its path suffix
///
/// Precedence: `.pdf`, then `.jpg`/`.jpeg`, then `.png`, else [`ContentKind::Html`].
/// Matching is case-insensitive and looks at the path only, so query strings and
/// fragments do not hide the extension.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use menu_scout::url::{infer_content_kind, ContentKind};
///
/// let url = Url::parse("https://example.com/files/Dinner.PDF?v=2").unwrap();
/// assert_eq!(infer_content_kind(&url), ContentKind::Pdf);
/// ```
pub fn infer_content_kind(url: &Url) -> ContentKind {
    infer_from_path(url.path())
}

/// Same as [`infer_content_kind`] for a raw path or URL string
pub fn infer_from_path(path: &str) -> ContentKind {
    let path = path.to_lowercase();

    if path.ends_with(".pdf") {
        ContentKind::Pdf
    } else if path.ends_with(".jpg") || path.ends_with(".jpeg") {
        ContentKind::Jpeg
    } else if path.ends_with(".png") {
        ContentKind::Png
    } else {
        ContentKind::Html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_any_case() {
        assert_eq!(infer_from_path("/menu.pdf"), ContentKind::Pdf);
        assert_eq!(infer_from_path("/MENU.PDF"), ContentKind::Pdf);
        assert_eq!(ContentKind::Pdf.mime_type(), "application/pdf");
    }

    #[test]
    fn test_jpeg_suffixes() {
        assert_eq!(infer_from_path("photo.JPG"), ContentKind::Jpeg);
        assert_eq!(infer_from_path("/img/board.jpeg"), ContentKind::Jpeg);
        assert_eq!(ContentKind::Jpeg.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_png() {
        assert_eq!(infer_from_path("/specials.Png"), ContentKind::Png);
        assert_eq!(ContentKind::Png.mime_type(), "image/png");
    }

    #[test]
    fn test_no_extension_defaults_to_text() {
        assert_eq!(infer_from_path("page"), ContentKind::Html);
        assert_eq!(infer_from_path("/menu/"), ContentKind::Html);
        assert_eq!(infer_from_path("/index.html"), ContentKind::Html);
        assert_eq!(ContentKind::Html.mime_type(), "text/plain");
    }

    #[test]
    fn test_extension_must_be_suffix() {
        assert_eq!(infer_from_path("/menu.pdf/view"), ContentKind::Html);
        assert_eq!(infer_from_path("/pdf"), ContentKind::Html);
    }

    #[test]
    fn test_url_query_does_not_hide_extension() {
        let url = Url::parse("https://example.com/lunch.png?size=large#top").unwrap();
        assert_eq!(infer_content_kind(&url), ContentKind::Png);
    }

    #[test]
    fn test_display() {
        assert_eq!(ContentKind::Html.to_string(), "html");
        assert_eq!(ContentKind::Jpeg.to_string(), "jpeg");
    }
}
