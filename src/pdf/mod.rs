pub mod document;

pub use document::PdfDocument;

#[cfg(test)]
pub(crate) mod test_support {
    use lopdf::{
        content::{Content, Operation},
        Dictionary, Document, Object, Stream, StringFormat,
    };

    /// An in-memory PDF whose page `n` draws the text "Page n".
    pub fn sample_pdf(num_pages: u32) -> Vec<u8> {
        build_pdf(num_pages, None)
    }

    /// Like [`sample_pdf`], but page `broken` (1-based) points its
    /// `Contents` at an object the file does not contain.
    pub fn sample_pdf_with_broken_page(num_pages: u32, broken: u32) -> Vec<u8> {
        build_pdf(num_pages, Some(broken))
    }

    fn build_pdf(num_pages: u32, broken: Option<u32>) -> Vec<u8> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let mut page_ids = Vec::new();
        for i in 0..num_pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(12)]),
                    Operation::new("Td", vec![Object::Integer(100), Object::Integer(700)]),
                    Operation::new(
                        "Tj",
                        vec![Object::String(
                            format!("Page {}", i + 1).into_bytes(),
                            StringFormat::Literal,
                        )],
                    ),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = if broken == Some(i + 1) {
                (9999, 0)
            } else {
                doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()))
            };

            let page = Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Page".to_vec())),
                ("Parent", Object::Reference(pages_id)),
                (
                    "MediaBox",
                    Object::Array(vec![
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Integer(612),
                        Object::Integer(792),
                    ]),
                ),
                ("Contents", Object::Reference(content_id)),
            ]);
            page_ids.push(doc.add_object(page));
        }

        let pages = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Count", Object::Integer(num_pages as i64)),
            (
                "Kids",
                Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
            ),
        ]);
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]);
        let catalog_id = doc.add_object(catalog);
        doc.trailer.set("Root", Object::Reference(catalog_id));

        let info = Dictionary::from_iter(vec![(
            "Title",
            Object::String(b"Sample".to_vec(), StringFormat::Literal),
        )]);
        let info_id = doc.add_object(info);
        doc.trailer.set("Info", Object::Reference(info_id));

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    /// The "Page n" label drawn on each page of `bytes`, in page order.
    pub fn page_labels_of(bytes: &[u8]) -> Vec<String> {
        let doc = Document::load_mem(bytes).unwrap();
        doc.get_pages()
            .values()
            .map(|&page_id| {
                let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
                content
                    .operations
                    .iter()
                    .find(|op| op.operator == "Tj")
                    .and_then(|op| op.operands.first())
                    .and_then(|obj| obj.as_str().ok())
                    .map(|s| String::from_utf8_lossy(s).into_owned())
                    .unwrap_or_default()
            })
            .collect()
    }
}
