//! Turning pages of card images into PDF files
//!
//! Pages are split into consecutive chunks, one output file per chunk. Each
//! page gets its card bitmaps placed at their slot geometry with the cut
//! lines drawn on top.

use crate::constants::*;
use crate::layout::{LayoutGeometry, Rect};
use crate::marks::{calculate_cut_lines, generate_cut_line_ops};
use crate::options::ProxyOptions;
use crate::types::{CardImage, Document, Page, PixelSize, Result, WrittenDocument};
use printpdf::{
    BuiltinFont, Color, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Point, Pt, RawImage,
    RawImageData, RawImageFormat, Rgb, TextItem, XObjectTransform,
};
use std::path::Path;

/// Output file name for the `index`-th of `total` documents
pub fn document_file_name(index: usize, total: usize) -> String {
    if total <= 1 {
        format!("{}.pdf", OUTPUT_STEM)
    } else {
        format!("{}_part{:02}.pdf", OUTPUT_STEM, index + 1)
    }
}

/// Partition pages into documents of at most `pages_per_file` pages, in order
pub fn assemble(pages: Vec<Page>, pages_per_file: usize) -> Vec<Document> {
    let chunk_size = pages_per_file.max(1);
    let total = pages.len().div_ceil(chunk_size);

    log::info!(
        "Splitting {} page(s) into {} file(s) of up to {} page(s)",
        pages.len(),
        total,
        chunk_size
    );

    let mut pages = pages.into_iter();
    (0..total)
        .map(|index| {
            let chunk: Vec<Page> = pages.by_ref().take(chunk_size).collect();
            log::debug!("Part {}: {} page(s)", index + 1, chunk.len());
            Document {
                file_name: document_file_name(index, total),
                pages: chunk,
            }
        })
        .collect()
}

/// Render every document and write it to `output_dir`.
///
/// Documents are finalized strictly in order; the first failure aborts the
/// remaining ones.
pub async fn write_documents(
    documents: Vec<Document>,
    layout: &LayoutGeometry,
    options: &ProxyOptions,
    output_dir: impl AsRef<Path>,
) -> Result<Vec<WrittenDocument>> {
    let output_dir = output_dir.as_ref().to_owned();
    tokio::fs::create_dir_all(&output_dir).await?;

    let total = documents.len();
    let mut written = Vec::with_capacity(total);

    for (index, document) in documents.into_iter().enumerate() {
        let path = output_dir.join(&document.file_name);
        let page_count = document.pages.len();
        log::info!(
            "Generating PDF ({}/{}): {} with {} page(s)",
            index + 1,
            total,
            document.file_name,
            page_count
        );

        let layout = layout.clone();
        let options = options.clone();
        let bytes =
            tokio::task::spawn_blocking(move || render_document(&document, &layout, &options))
                .await??;

        tokio::fs::write(&path, &bytes).await?;
        let byte_size = tokio::fs::metadata(&path).await?.len();
        log::info!(
            "Saved {}: {:.1}MB ({} bytes)",
            path.display(),
            megabytes(byte_size),
            byte_size
        );

        written.push(WrittenDocument {
            path,
            page_count,
            byte_size,
        });
    }

    Ok(written)
}

/// Render one document to PDF bytes
pub fn render_document(
    document: &Document,
    layout: &LayoutGeometry,
    options: &ProxyOptions,
) -> Result<Vec<u8>> {
    let mut doc = PdfDocument::new(OUTPUT_STEM);
    let page_count = document.pages.len();

    for (page_index, page) in document.pages.iter().enumerate() {
        log::info!("Rendering page {}/{}", page_index + 1, page_count);

        let mut ops = Vec::new();
        for (slot, card) in page.cards.iter().take(layout.slot_count()).enumerate() {
            let pos = layout.grid_position(slot);
            let rect = layout.slot_rect_pt(pos);
            log::debug!(
                "Card #{} (row {}, col {}) at ({:.1}, {:.1})pt",
                slot + 1,
                pos.row + 1,
                pos.col + 1,
                rect.x,
                rect.y
            );

            let image = embed_card(card);
            let image_id = doc.add_image(&image);
            ops.push(Op::UseXobject {
                id: image_id,
                transform: slot_transform(&rect, card.size()),
            });

            if let Some(caption) = card.caption() {
                ops.extend(caption_ops(caption, &rect));
            }
        }

        if options.cut_lines {
            let lines = calculate_cut_lines(layout, options.cut_line_extension_mm);
            ops.extend(generate_cut_line_ops(&lines, layout.page_height_mm));
        }

        doc.pages.push(PdfPage::new(
            Mm(layout.page_width_mm),
            Mm(layout.page_height_mm),
            ops,
        ));
    }

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);

    Ok(bytes)
}

/// Hand a card bitmap to the PDF writer as raw RGB samples
fn embed_card(card: &CardImage) -> RawImage {
    let size = card.size();
    RawImage {
        pixels: RawImageData::U8(card.pixels().as_raw().clone()),
        width: size.width as usize,
        height: size.height as usize,
        data_format: RawImageFormat::RGB8,
        tag: Vec::new(),
    }
}

/// Transform that stretches a card bitmap over its slot
fn slot_transform(rect: &Rect, size: PixelSize) -> XObjectTransform {
    let natural_width = size.width as f32 * 72.0 / IMAGE_DPI;
    let natural_height = size.height as f32 * 72.0 / IMAGE_DPI;

    XObjectTransform {
        translate_x: Some(Pt(rect.x)),
        translate_y: Some(Pt(rect.y)),
        scale_x: Some(rect.width / natural_width),
        scale_y: Some(rect.height / natural_height),
        dpi: Some(IMAGE_DPI),
        ..Default::default()
    }
}

/// Grey label centered in a slot
fn caption_ops(caption: &str, rect: &Rect) -> Vec<Op> {
    let text_width = caption.chars().count() as f32
        * PLACEHOLDER_FONT_SIZE
        * HELVETICA_CHAR_WIDTH_RATIO;
    let x = rect.center_x() - text_width / 2.0;
    let y = rect.center_y() - PLACEHOLDER_FONT_SIZE / 2.0;

    vec![
        Op::SaveGraphicsState,
        Op::SetFillColor {
            col: Color::Rgb(Rgb {
                r: PLACEHOLDER_LABEL_COLOR,
                g: PLACEHOLDER_LABEL_COLOR,
                b: PLACEHOLDER_LABEL_COLOR,
                icc_profile: None,
            }),
        },
        Op::StartTextSection,
        Op::SetTextCursor {
            pos: Point { x: Pt(x), y: Pt(y) },
        },
        Op::SetFontSizeBuiltinFont {
            font: BuiltinFont::Helvetica,
            size: Pt(PLACEHOLDER_FONT_SIZE),
        },
        Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(caption.to_string())],
            font: BuiltinFont::Helvetica,
        },
        Op::EndTextSection,
        Op::RestoreGraphicsState,
    ]
}

/// Bytes to megabytes, for progress output
pub fn megabytes(bytes: u64) -> f64 {
    bytes as f64 / 1024.0 / 1024.0
}
