//! Modern: blue sidebar holding identity, contact details and skill bars;
//! summary, experience and education in the main column.

use crate::models::{Resume, ResumeTemplate};
use crate::render::dates::{education_range, work_range};
use crate::render::layout::{contact_items, degree_line, page_background, Canvas};
use crate::render::templates::{GRAY_600, GRAY_700, GRAY_800};
use crate::render::{
    Color, Element, FontFamily, FontWeight, Paint, RenderedDocument, TextStyle, PAGE_WIDTH_PX,
};

const BLUE_200: Color = Color::hex(0xbfdbfe);
const BLUE_400: Color = Color::hex(0x60a5fa);
const BLUE_600: Color = Color::hex(0x2563eb);

const PADDING: f32 = 24.0;
const SIDEBAR_WIDTH: f32 = PAGE_WIDTH_PX / 3.0;
const PHOTO_SIZE: f32 = 96.0;

fn text(size: f32, color: Color) -> TextStyle {
    TextStyle::new(FontFamily::Sans, size, color)
}

pub fn render(resume: &Resume) -> RenderedDocument {
    let mut canvas = Canvas::new();
    let sidebar_bottom = sidebar(&mut canvas, resume);
    let main_bottom = main_column(&mut canvas, resume);

    canvas.finish(
        ResumeTemplate::Modern,
        sidebar_bottom.max(main_bottom) + PADDING,
        |height| {
            vec![
                page_background(height, Color::WHITE),
                Element::Rect {
                    x: 0.0,
                    y: 0.0,
                    width: SIDEBAR_WIDTH,
                    height,
                    fill: Paint::Solid(BLUE_600),
                    radius: 0.0,
                },
            ]
        },
    )
}

/// Only inline `data:image/...` photos are drawn; anything else would be fetched
/// from disk or the network at export time.
fn is_inline_image(href: &str) -> bool {
    href.starts_with("data:image/")
}

fn sidebar(canvas: &mut Canvas, resume: &Resume) -> f32 {
    let info = &resume.personal_info;
    let x = PADDING;
    let width = SIDEBAR_WIDTH - PADDING * 2.0;
    let mut y = PADDING;

    if let Some(photo) = info.photo_url.as_deref().filter(|p| is_inline_image(p)) {
        canvas.push(Element::Image {
            x,
            y,
            width: PHOTO_SIZE,
            height: PHOTO_SIZE,
            href: photo.to_string(),
        });
        y += PHOTO_SIZE + 16.0;
    }

    y = canvas.paragraph(x, y, width, &info.full_name(), text(24.0, Color::WHITE).weight(FontWeight::Bold));
    y = canvas.paragraph(x, y + 4.0, width, &info.profession, text(18.0, BLUE_200));
    y += 32.0;

    let contact = contact_items(info);
    if !contact.is_empty() {
        y = sidebar_heading(canvas, x, y, width, "Contact");
        for (i, item) in contact.iter().enumerate() {
            if i > 0 {
                y += 8.0;
            }
            y = canvas.paragraph(x, y, width, item, text(14.0, Color::WHITE));
        }
        y += 32.0;
    }

    if !resume.skills.is_empty() {
        y = sidebar_heading(canvas, x, y, width, "Skills");
        let name_width = width / 2.0 - 8.0;
        let bar_x = x + width / 2.0;
        for (i, skill) in resume.skills.iter().enumerate() {
            if i > 0 {
                y += 4.0;
            }
            let style = text(16.0, Color::WHITE);
            let row_bottom = canvas.paragraph(x, y, name_width, &skill.name, style);
            let row_bottom = row_bottom.max(y + style.line_height());
            // Bar centred on the first line of the name.
            let bar_top = y + style.line_height() / 2.0 - 3.0;
            canvas.level_bar(bar_x, bar_top, width / 2.0, skill.level, BLUE_400, Color::WHITE);
            y = row_bottom;
        }
        y += 32.0;
    }

    y - 32.0
}

fn sidebar_heading(canvas: &mut Canvas, x: f32, top: f32, width: f32, title: &str) -> f32 {
    let bottom = canvas.line(x, top, title, text(18.0, Color::WHITE).weight(FontWeight::Semibold));
    canvas.hline(x, x + width, bottom + 4.0, BLUE_400, 1.0);
    bottom + 4.0 + 12.0
}

fn main_column(canvas: &mut Canvas, resume: &Resume) -> f32 {
    const SECTION_GAP: f32 = 24.0;
    let x = SIDEBAR_WIDTH + PADDING;
    let width = PAGE_WIDTH_PX - SIDEBAR_WIDTH - PADDING * 2.0;
    let mut y = PADDING;

    if !resume.summary.trim().is_empty() {
        y = main_heading(canvas, x, y, "Profile Summary");
        y = canvas.paragraph(x, y, width, &resume.summary, text(16.0, GRAY_700));
        y += SECTION_GAP;
    }

    if !resume.work_experience.is_empty() {
        y = main_heading(canvas, x, y, "Work Experience");
        for (i, job) in resume.work_experience.iter().enumerate() {
            if i > 0 {
                y += 16.0;
            }
            y = bordered_entry(canvas, x, y, width, |canvas, ex, ew, top| {
                let mut y = canvas.paragraph(ex, top, ew, &job.position, text(18.0, GRAY_800).weight(FontWeight::Medium));
                y = canvas.paragraph(ex, y, ew, &job.company, text(16.0, BLUE_600).weight(FontWeight::Medium));
                if let Some(range) = work_range(job) {
                    y = canvas.line(ex, y, &range, text(14.0, GRAY_600)) + 8.0;
                }
                canvas.paragraph(ex, y, ew, &job.description, text(16.0, GRAY_700))
            });
        }
        y += SECTION_GAP;
    }

    if !resume.education.is_empty() {
        y = main_heading(canvas, x, y, "Education");
        for (i, edu) in resume.education.iter().enumerate() {
            if i > 0 {
                y += 16.0;
            }
            y = bordered_entry(canvas, x, y, width, |canvas, ex, ew, top| {
                let mut y = canvas.paragraph(
                    ex,
                    top,
                    ew,
                    &degree_line(&edu.degree, &edu.field_of_study),
                    text(18.0, GRAY_800).weight(FontWeight::Medium),
                );
                y = canvas.paragraph(ex, y, ew, &edu.school, text(16.0, BLUE_600).weight(FontWeight::Medium));
                if let Some(range) = education_range(edu) {
                    y = canvas.line(ex, y, &range, text(14.0, GRAY_600)) + 8.0;
                }
                canvas.paragraph(ex, y, ew, &edu.description, text(16.0, GRAY_700))
            });
        }
        y += SECTION_GAP;
    }

    y - SECTION_GAP
}

fn main_heading(canvas: &mut Canvas, x: f32, top: f32, title: &str) -> f32 {
    canvas.line(x, top, title, text(20.0, BLUE_600).weight(FontWeight::Semibold)) + 12.0
}

/// Entry with a 2px blue rule down its left edge. `body` receives the
/// indented x, width and top, and returns its bottom.
fn bordered_entry<F>(canvas: &mut Canvas, x: f32, top: f32, width: f32, body: F) -> f32
where
    F: FnOnce(&mut Canvas, f32, f32, f32) -> f32,
{
    const INDENT: f32 = 18.0;
    let bottom = body(canvas, x + INDENT, width - INDENT, top);
    canvas.vline(x + 1.0, top, bottom, BLUE_600, 2.0);
    bottom
}
