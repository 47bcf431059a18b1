//! PDF assembly: one JPEG XObject shared by every page.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::export::paginate::{PageLayout, A4_HEIGHT_MM, A4_WIDTH_MM};
use crate::export::ExportError;

const PT_PER_MM: f32 = 72.0 / 25.4;
const IMAGE_NAME: &str = "Im0";

/// Builds an A4 PDF that shows `jpeg` (a `width x height` RGB bitmap) across
/// `layout.page_count` pages.
pub fn assemble(jpeg: Vec<u8>, width: u32, height: u32, layout: &PageLayout) -> Result<Vec<u8>, ExportError> {
    let page_w = A4_WIDTH_MM * PT_PER_MM;
    let page_h = A4_HEIGHT_MM * PT_PER_MM;
    let image_w = layout.image_width_mm * PT_PER_MM;
    let image_h = layout.image_height_mm * PT_PER_MM;

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        },
        jpeg,
    )
    .with_compression(false);
    let image_id = doc.add_object(image);
    let resources_id = doc.add_object(dictionary! {
        "XObject" => dictionary! { IMAGE_NAME => image_id },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(layout.page_count);
    for placement in layout.placements() {
        // PDF space grows upwards; put the image's top edge at the page top
        // plus the placement's shift.
        let offset_pt = placement.offset_mm * PT_PER_MM;
        let y = page_h - image_h - offset_pt;
        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        image_w.into(),
                        0.into(),
                        0.into(),
                        image_h.into(),
                        0.into(),
                        y.into(),
                    ],
                ),
                Operation::new("Do", vec![IMAGE_NAME.into()]),
                Operation::new("Q", vec![]),
            ],
        };
        let encoded = content
            .encode()
            .map_err(|e| ExportError::Export(format!("Failed to encode page content: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), page_w.into(), page_h.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| ExportError::Export(format!("Failed to write PDF: {e}")))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_jpeg() -> Vec<u8> {
        let bitmap = image::RgbImage::from_pixel(4, 8, image::Rgb([200, 10, 10]));
        let mut out = Vec::new();
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, 92)
            .encode_image(&bitmap)
            .unwrap();
        out
    }

    fn image_objects(doc: &Document) -> usize {
        doc.objects
            .values()
            .filter(|obj| match obj {
                Object::Stream(stream) => stream
                    .dict
                    .get(b"Subtype")
                    .and_then(|s| s.as_name())
                    .map(|name| name == b"Image")
                    .unwrap_or(false),
                _ => false,
            })
            .count()
    }

    #[test]
    fn test_pages_share_one_image() {
        let layout = PageLayout::for_bitmap(4, 14);
        assert_eq!(layout.page_count, 3);
        let bytes = assemble(tiny_jpeg(), 4, 14, &layout).unwrap();

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
        assert_eq!(image_objects(&doc), 1);
    }

    #[test]
    fn test_page_is_a4() {
        let layout = PageLayout::for_bitmap(4, 8);
        let bytes = assemble(tiny_jpeg(), 4, 8, &layout).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let (_, page_id) = doc.get_pages().into_iter().next().unwrap();
        let page = doc.get_dictionary(page_id).unwrap();
        let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
        let height = media_box[3].as_float().unwrap();
        assert!((height - 841.89).abs() < 0.01);
    }

    #[test]
    fn test_later_pages_shift_image_up() {
        let layout = PageLayout::for_bitmap(4, 11);
        let bytes = assemble(tiny_jpeg(), 4, 11, &layout).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();

        let ys: Vec<f32> = doc
            .get_pages()
            .values()
            .map(|page_id| {
                let content = Content::decode(&doc.get_page_content(*page_id).unwrap()).unwrap();
                let cm = content.operations.iter().find(|op| op.operator == "cm").unwrap();
                cm.operands[5].as_float().unwrap()
            })
            .collect();
        assert_eq!(ys.len(), 2);
        let page_h = A4_HEIGHT_MM * PT_PER_MM;
        assert!((ys[1] - ys[0] - page_h).abs() < 0.5);
    }
}
