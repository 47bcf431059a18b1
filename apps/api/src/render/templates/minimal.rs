//! Minimal: plain white page, left-aligned header, thin rules under section
//! titles, skills as grey chips.

use crate::models::{Resume, ResumeTemplate};
use crate::render::dates::{education_range, work_range};
use crate::render::layout::{city_line, degree_line, page_background, skill_names, Canvas};
use crate::render::templates::{title_with_date, GRAY_100, GRAY_200, GRAY_600, GRAY_700, GRAY_800};
use crate::render::{Color, FontFamily, FontWeight, RenderedDocument, TextStyle, PAGE_WIDTH_PX};

const PADDING: f32 = 32.0;
const SECTION_GAP: f32 = 24.0;
const ENTRY_GAP: f32 = 16.0;

fn text(size: f32, color: Color) -> TextStyle {
    TextStyle::new(FontFamily::Sans, size, color)
}

pub fn render(resume: &Resume) -> RenderedDocument {
    let mut canvas = Canvas::new();
    let x = PADDING;
    let width = PAGE_WIDTH_PX - PADDING * 2.0;
    let info = &resume.personal_info;

    let mut y = PADDING;
    y = canvas.paragraph(x, y, width, &info.full_name(), text(30.0, GRAY_800).weight(FontWeight::Bold));
    y = canvas.paragraph(x, y + 4.0, width, &info.profession, text(20.0, GRAY_600));

    let contact: Vec<String> = [info.email.clone(), info.phone.clone(), city_line(info)]
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .collect();
    y = canvas.inline_row(x, y + 12.0, width, &contact, 12.0, text(14.0, GRAY_600));
    y += SECTION_GAP;

    if !resume.summary.trim().is_empty() {
        y = heading(&mut canvas, x, y, width, "Summary");
        y = canvas.paragraph(x, y, width, &resume.summary, text(16.0, GRAY_700));
        y += SECTION_GAP;
    }

    if !resume.work_experience.is_empty() {
        y = heading(&mut canvas, x, y, width, "Experience");
        for (i, job) in resume.work_experience.iter().enumerate() {
            if i > 0 {
                y += ENTRY_GAP;
            }
            y = title_with_date(
                &mut canvas,
                x,
                y,
                width,
                &job.position,
                text(18.0, GRAY_800).weight(FontWeight::Medium),
                work_range(job),
                text(14.0, GRAY_600),
            );
            y = canvas.paragraph(x, y, width, &job.company, text(16.0, GRAY_700).weight(FontWeight::Medium));
            y = canvas.paragraph(x, y + 4.0, width, &job.description, text(16.0, GRAY_700));
        }
        y += SECTION_GAP;
    }

    if !resume.education.is_empty() {
        y = heading(&mut canvas, x, y, width, "Education");
        for (i, edu) in resume.education.iter().enumerate() {
            if i > 0 {
                y += ENTRY_GAP;
            }
            y = title_with_date(
                &mut canvas,
                x,
                y,
                width,
                &degree_line(&edu.degree, &edu.field_of_study),
                text(18.0, GRAY_800).weight(FontWeight::Medium),
                education_range(edu),
                text(14.0, GRAY_600),
            );
            y = canvas.paragraph(x, y, width, &edu.school, text(16.0, GRAY_700).weight(FontWeight::Medium));
            y = canvas.paragraph(x, y + 4.0, width, &edu.description, text(16.0, GRAY_700));
        }
        y += SECTION_GAP;
    }

    let skills = skill_names(resume);
    if !skills.is_empty() {
        y = heading(&mut canvas, x, y, width, "Skills");
        y = canvas.chips(x, y, width, &skills, text(16.0, GRAY_700), GRAY_100, 12.0, 4.0);
        y += SECTION_GAP;
    }

    canvas.finish(ResumeTemplate::Minimal, y + PADDING - SECTION_GAP, |height| {
        vec![page_background(height, Color::WHITE)]
    })
}

/// Section title with a hairline rule underneath.
fn heading(canvas: &mut Canvas, x: f32, top: f32, width: f32, title: &str) -> f32 {
    let bottom = canvas.line(x, top, title, text(20.0, GRAY_800).weight(FontWeight::Semibold));
    canvas.hline(x, x + width, bottom + 4.0, GRAY_200, 1.0);
    bottom + 4.0 + 12.0
}
