use html_escape::{encode_double_quoted_attribute, encode_text};

use super::{DocumentWriter, Page, PageGeometry};

/// Assembles pages into one printable HTML document: landscape, one slide
/// per page, page box sized to the slide canvas.
pub struct HtmlDocumentWriter;

impl DocumentWriter for HtmlDocumentWriter {
    fn extension(&self) -> &'static str {
        "html"
    }

    fn assemble(&self, title: &str, geometry: PageGeometry, pages: &[Page]) -> String {
        let (w, h) = (geometry.width, geometry.height);
        let mut doc = String::new();
        doc.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        doc.push_str(&format!("<title>{}</title>\n", encode_text(title)));
        doc.push_str(&format!(
            "<style>\n@page {{ size: {w}px {h}px; margin: 0; }}\n\
             body {{ margin: 0; background: #000; }}\n\
             .page {{ width: {w}px; height: {h}px; overflow: hidden; break-after: page; page-break-after: always; }}\n\
             .page:last-child {{ break-after: auto; page-break-after: auto; }}\n\
             </style>\n"
        ));
        doc.push_str("</head>\n<body>\n");
        for page in pages {
            doc.push_str(&format!(
                "<section class=\"page\" data-slide-id=\"{}\">\n{}</section>\n",
                encode_double_quoted_attribute(&page.slide_id),
                page.markup
            ));
        }
        doc.push_str("</body>\n</html>\n");
        doc
    }
}
