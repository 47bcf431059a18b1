//! Creative: purple gradient header, content on white cards over a light grey
//! page, experience drawn as a timeline, skills as purple chips.

use crate::models::{Resume, ResumeTemplate};
use crate::render::dates::{education_range, work_range};
use crate::render::font_metrics::get_metrics;
use crate::render::layout::{contact_items, degree_line, page_background, skill_names, Canvas};
use crate::render::templates::{GRAY_200, GRAY_50, GRAY_500, GRAY_700, GRAY_800};
use crate::render::{
    Color, Element, FontFamily, FontWeight, Paint, RenderedDocument, TextStyle, PAGE_WIDTH_PX,
};

const PURPLE_100: Color = Color::hex(0xf3e8ff);
const PURPLE_200: Color = Color::hex(0xe9d5ff);
const PURPLE_600: Color = Color::hex(0x9333ea);
const PURPLE_800: Color = Color::hex(0x6b21a8);
const INDIGO_600: Color = Color::hex(0x4f46e5);

const PADDING: f32 = 32.0;
const CARD_PADDING: f32 = 24.0;
const CARD_GAP: f32 = 32.0;
/// Indent of timeline entries from the rail.
const TIMELINE_INDENT: f32 = 32.0;

fn text(size: f32, color: Color) -> TextStyle {
    TextStyle::new(FontFamily::Sans, size, color)
}

pub fn render(resume: &Resume) -> RenderedDocument {
    let mut canvas = Canvas::new();
    let info = &resume.personal_info;
    let x = PADDING;
    let width = PAGE_WIDTH_PX - PADDING * 2.0;

    let header = canvas.mark();
    let mut y = name_line(&mut canvas, x, PADDING, &info.first_name, &info.last_name);
    y = canvas.paragraph(x, y + 8.0, width, &info.profession, text(20.0, PURPLE_200));
    y = canvas.inline_row(x, y + 32.0, width, &contact_items(info), 24.0, text(14.0, Color::WHITE));
    y += PADDING;
    canvas.insert_behind(
        header,
        Element::Rect {
            x: 0.0,
            y: 0.0,
            width: PAGE_WIDTH_PX,
            height: y,
            fill: Paint::Gradient(PURPLE_600, INDIGO_600),
            radius: 0.0,
        },
    );

    y += PADDING;
    let inner_x = x + CARD_PADDING;
    let inner_width = width - CARD_PADDING * 2.0;

    if !resume.summary.trim().is_empty() {
        y = card(&mut canvas, x, y, width, |canvas, top| {
            let y = card_heading(canvas, inner_x, top, "About Me", 16.0);
            canvas.paragraph(inner_x, y, inner_width, &resume.summary, text(16.0, GRAY_700))
        });
        y += 40.0;
    }

    if !resume.work_experience.is_empty() {
        y = card(&mut canvas, x, y, width, |canvas, top| {
            let mut y = card_heading(canvas, inner_x, top, "Experience", 24.0);
            for (i, job) in resume.work_experience.iter().enumerate() {
                if i > 0 {
                    y += 32.0;
                }
                let entry_top = y;
                let tx = inner_x + TIMELINE_INDENT;
                let tw = inner_width - TIMELINE_INDENT;
                let rail = canvas.mark();
                y = canvas.paragraph(tx, y, tw, &job.position, text(20.0, GRAY_800).weight(FontWeight::Semibold));
                y = canvas.paragraph(tx, y, tw, &job.company, text(16.0, PURPLE_600).weight(FontWeight::Medium));
                if let Some(range) = work_range(job) {
                    y = canvas.line(tx, y, &range, text(14.0, GRAY_500)) + 8.0;
                }
                y = canvas.paragraph(tx, y, tw, &job.description, text(16.0, GRAY_700));

                canvas.insert_behind(
                    rail,
                    Element::Line {
                        x1: inner_x + 1.0,
                        y1: entry_top + 8.0,
                        x2: inner_x + 1.0,
                        y2: y.max(entry_top + 24.0),
                        stroke: PURPLE_200,
                        width: 2.0,
                    },
                );
                canvas.circle(inner_x, entry_top + 12.0, 8.0, PURPLE_600);
            }
            y
        });
        y += CARD_GAP;
    }

    if !resume.education.is_empty() {
        y = card(&mut canvas, x, y, width, |canvas, top| {
            let mut y = card_heading(canvas, inner_x, top, "Education", 24.0);
            for (i, edu) in resume.education.iter().enumerate() {
                if i > 0 {
                    y += 24.0;
                }
                y = canvas.paragraph(
                    inner_x,
                    y,
                    inner_width,
                    &degree_line(&edu.degree, &edu.field_of_study),
                    text(18.0, GRAY_800).weight(FontWeight::Semibold),
                );
                y = canvas.paragraph(inner_x, y, inner_width, &edu.school, text(16.0, PURPLE_600));
                if let Some(range) = education_range(edu) {
                    y = canvas.line(inner_x, y, &range, text(14.0, GRAY_500)) + 4.0;
                }
                y = canvas.paragraph(inner_x, y, inner_width, &edu.description, text(16.0, GRAY_700));
            }
            y
        });
        y += CARD_GAP;
    }

    let skills = skill_names(resume);
    if !skills.is_empty() {
        y = card(&mut canvas, x, y, width, |canvas, top| {
            let y = card_heading(canvas, inner_x, top, "Skills", 24.0);
            canvas.chips(inner_x, y, inner_width, &skills, text(16.0, PURPLE_800), PURPLE_100, 16.0, 8.0)
        });
        y += CARD_GAP;
    }

    canvas.finish(ResumeTemplate::Creative, y + PADDING - CARD_GAP, |height| {
        vec![page_background(height, GRAY_50)]
    })
}

/// First name in bold, last name in light weight, on one line when they fit.
fn name_line(canvas: &mut Canvas, x: f32, top: f32, first: &str, last: &str) -> f32 {
    let bold = text(36.0, Color::WHITE).weight(FontWeight::Bold);
    let light = text(36.0, Color::WHITE).weight(FontWeight::Light);
    let width = PAGE_WIDTH_PX - PADDING * 2.0;

    let first_bottom = canvas.line(x, top, first.trim(), bold);
    if first.trim().is_empty() {
        return canvas.line(x, top, last.trim(), light);
    }
    let metrics = get_metrics(FontFamily::Sans);
    let offset = metrics.width_px(&format!("{} ", first.trim()), bold.size, true);
    if offset + metrics.width_px(last.trim(), light.size, false) <= width {
        canvas.line(x + offset, top, last.trim(), light).max(first_bottom)
    } else {
        canvas.line(x, first_bottom, last.trim(), light)
    }
}

fn card_heading(canvas: &mut Canvas, x: f32, top: f32, title: &str, gap_below: f32) -> f32 {
    canvas.line(x, top, title, text(24.0, PURPLE_600).weight(FontWeight::Bold)) + gap_below
}

/// Lays out `body` inside a padded white card and paints the card behind it.
fn card<F>(canvas: &mut Canvas, x: f32, top: f32, width: f32, body: F) -> f32
where
    F: FnOnce(&mut Canvas, f32) -> f32,
{
    let mark = canvas.mark();
    let bottom = body(canvas, top + CARD_PADDING) + CARD_PADDING;
    let height = bottom - top;
    canvas.insert_behind(
        mark,
        Element::Rect {
            x,
            y: top,
            width,
            height,
            fill: Paint::Solid(Color::WHITE),
            radius: 8.0,
        },
    );
    // Soft shadow under the card edge.
    canvas.insert_behind(
        mark,
        Element::Rect {
            x,
            y: top + 1.0,
            width,
            height,
            fill: Paint::Solid(GRAY_200),
            radius: 8.0,
        },
    );
    bottom
}
