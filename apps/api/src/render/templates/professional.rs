//! Professional: serif type, dark centred header band, heavy section rules,
//! education and skills side by side with level bars.

use crate::models::{Resume, ResumeTemplate, SkillItem};
use crate::render::dates::{education_range, work_range};
use crate::render::layout::{contact_items, degree_line, page_background, Canvas};
use crate::render::templates::{title_with_date, GRAY_200, GRAY_600, GRAY_700, GRAY_800};
use crate::render::{
    Anchor, Color, Element, FontFamily, FontWeight, RenderedDocument, TextStyle, PAGE_WIDTH_PX,
};

const PADDING: f32 = 32.0;
const SECTION_GAP: f32 = 32.0;
const COLUMN_GAP: f32 = 32.0;

fn text(size: f32, color: Color) -> TextStyle {
    TextStyle::new(FontFamily::Serif, size, color)
}

pub fn render(resume: &Resume) -> RenderedDocument {
    let mut canvas = Canvas::new();
    let info = &resume.personal_info;
    let x = PADDING;
    let width = PAGE_WIDTH_PX - PADDING * 2.0;

    // Header band, painted once its height is known.
    let band = canvas.mark();
    let centred = |size: f32| text(size, Color::WHITE).anchor(Anchor::Middle);
    let mut y = PADDING;
    y = canvas.paragraph(x, y, width, &info.full_name(), centred(30.0).weight(FontWeight::Bold));
    y = canvas.paragraph(x, y + 4.0, width, &info.profession, centred(20.0));
    y = canvas.inline_row(x, y + 16.0, width, &contact_items(info), 16.0, centred(14.0));
    y += PADDING;
    canvas.insert_behind(band, header_band(y));

    y += PADDING;

    if !resume.summary.trim().is_empty() {
        y = heading(&mut canvas, x, y, width, "Professional Summary");
        y = canvas.paragraph(x, y, width, &resume.summary, text(16.0, GRAY_700));
        y += SECTION_GAP;
    }

    if !resume.work_experience.is_empty() {
        y = heading(&mut canvas, x, y, width, "Professional Experience");
        for (i, job) in resume.work_experience.iter().enumerate() {
            if i > 0 {
                y += 24.0;
            }
            y = title_with_date(
                &mut canvas,
                x,
                y,
                width,
                &job.position,
                text(20.0, GRAY_800).weight(FontWeight::Semibold),
                work_range(job),
                text(14.0, GRAY_600).weight(FontWeight::Medium),
            );
            y = canvas.paragraph(x, y + 8.0, width, &job.company, text(18.0, GRAY_800).weight(FontWeight::Medium));
            y = canvas.paragraph(x, y + 8.0, width, &job.description, text(16.0, GRAY_700));
        }
        y += SECTION_GAP;
    }

    // Education and skills share a two-column grid; whichever is present
    // fills the cells in that order.
    let column_width = (width - COLUMN_GAP) / 2.0;
    let mut cells = Vec::new();
    if !resume.education.is_empty() {
        cells.push(Cell::Education);
    }
    if !resume.skills.is_empty() {
        cells.push(Cell::Skills);
    }
    if !cells.is_empty() {
        let top = y;
        let mut bottom = top;
        for (i, cell) in cells.into_iter().enumerate() {
            let cx = x + i as f32 * (column_width + COLUMN_GAP);
            let cell_bottom = match cell {
                Cell::Education => education(&mut canvas, cx, top, column_width, resume),
                Cell::Skills => skills(&mut canvas, cx, top, column_width, &resume.skills),
            };
            bottom = bottom.max(cell_bottom);
        }
        y = bottom + SECTION_GAP;
    }

    canvas.finish(ResumeTemplate::Professional, y + PADDING - SECTION_GAP, |height| {
        vec![page_background(height, Color::WHITE)]
    })
}

enum Cell {
    Education,
    Skills,
}

fn header_band(height: f32) -> Element {
    Element::Rect {
        x: 0.0,
        y: 0.0,
        width: PAGE_WIDTH_PX,
        height,
        fill: GRAY_800.into(),
        radius: 0.0,
    }
}

/// Bold title over a 2px rule.
fn heading(canvas: &mut Canvas, x: f32, top: f32, width: f32, title: &str) -> f32 {
    let bottom = canvas.paragraph(x, top, width, title, text(24.0, GRAY_800).weight(FontWeight::Bold));
    canvas.hline(x, x + width, bottom + 8.0, GRAY_800, 2.0);
    bottom + 8.0 + 12.0
}

fn education(canvas: &mut Canvas, x: f32, top: f32, width: f32, resume: &Resume) -> f32 {
    let mut y = heading(canvas, x, top, width, "Education");
    for (i, edu) in resume.education.iter().enumerate() {
        if i > 0 {
            y += 16.0;
        }
        y = canvas.paragraph(x, y, width, &edu.school, text(18.0, GRAY_800).weight(FontWeight::Semibold));
        y = canvas.paragraph(
            x,
            y,
            width,
            &degree_line(&edu.degree, &edu.field_of_study),
            text(16.0, GRAY_800),
        );
        if let Some(range) = education_range(edu) {
            y = canvas.line(x, y, &range, text(14.0, GRAY_600));
        }
        y = canvas.paragraph(x, y + 4.0, width, &edu.description, text(16.0, GRAY_700));
    }
    y
}

/// Two-up grid of skill names, each over a level bar.
fn skills(canvas: &mut Canvas, x: f32, top: f32, width: f32, skills: &[SkillItem]) -> f32 {
    const CELL_GAP_X: f32 = 16.0;
    const ROW_GAP: f32 = 8.0;

    let mut y = heading(canvas, x, top, width, "Skills");
    let cell_width = (width - CELL_GAP_X) / 2.0;
    for (row_index, row) in skills.chunks(2).enumerate() {
        if row_index > 0 {
            y += ROW_GAP;
        }
        let mut row_bottom = y;
        for (i, skill) in row.iter().enumerate() {
            let cx = x + i as f32 * (cell_width + CELL_GAP_X);
            let name_bottom = canvas.paragraph(cx, y, cell_width, &skill.name, text(16.0, GRAY_800));
            let bar_top = name_bottom.max(y + text(16.0, GRAY_800).line_height()) + 4.0;
            let bar_bottom = canvas.level_bar(cx, bar_top, cell_width, skill.level, GRAY_200, GRAY_800);
            row_bottom = row_bottom.max(bar_bottom);
        }
        y = row_bottom;
    }
    y
}
