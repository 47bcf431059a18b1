//! The four resume templates. Each is a pure `render(&Resume) -> RenderedDocument`.

pub mod creative;
pub mod minimal;
pub mod modern;
pub mod professional;

use crate::render::font_metrics::get_metrics;
use crate::render::layout::Canvas;
use crate::render::{Anchor, Color, TextStyle};

pub(crate) const GRAY_50: Color = Color::hex(0xf9fafb);
pub(crate) const GRAY_100: Color = Color::hex(0xf3f4f6);
pub(crate) const GRAY_200: Color = Color::hex(0xe5e7eb);
pub(crate) const GRAY_500: Color = Color::hex(0x6b7280);
pub(crate) const GRAY_600: Color = Color::hex(0x4b5563);
pub(crate) const GRAY_700: Color = Color::hex(0x374151);
pub(crate) const GRAY_800: Color = Color::hex(0x1f2937);

/// Entry title on the left with an optional date label flush right on the
/// same row. The title wraps in the space the date leaves free.
#[allow(clippy::too_many_arguments)]
pub(crate) fn title_with_date(
    canvas: &mut Canvas,
    x: f32,
    top: f32,
    width: f32,
    title: &str,
    title_style: TextStyle,
    date: Option<String>,
    date_style: TextStyle,
) -> f32 {
    let Some(date) = date else {
        return canvas.paragraph(x, top, width, title, title_style);
    };

    let date_width = get_metrics(date_style.family).width_px(
        &date,
        date_style.size,
        date_style.weight.is_heavy(),
    );
    let title_width = (width - date_width - 16.0).max(width / 3.0);
    let title_bottom = canvas.paragraph(x, top, title_width, title, title_style);

    // Vertically centre the date on the first title line.
    let offset = ((title_style.line_height() - date_style.line_height()) / 2.0).max(0.0);
    let date_bottom = canvas.line(
        x + width,
        top + offset,
        &date,
        date_style.anchor(Anchor::End),
    );
    title_bottom.max(date_bottom)
}


#[cfg(test)]
mod tests {
    use super::fixtures::{job, sample_resume};
    use crate::models::{Resume, ResumeTemplate};
    use crate::render::{render, Element, PAGE_HEIGHT_PX, PAGE_WIDTH_PX};

    #[test]
    fn test_every_template_shows_core_content() {
        for template in ResumeTemplate::ALL {
            let doc = render(&sample_resume(template));
            let text = doc.text_lines().join("\n");
            assert_eq!(doc.template, template);
            assert_eq!(doc.width, PAGE_WIDTH_PX);
            for needle in [
                "Jane",
                "Software Engineer",
                "jane@example.com",
                "Senior Engineer",
                "Acme",
                "Jan 2020 - Present",
                "State University",
                "2012 - 2016",
                "Rust",
                "Shipped the billing rewrite.",
            ] {
                assert!(text.contains(needle), "{template:?} is missing {needle:?}");
            }
        }
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        for template in ResumeTemplate::ALL {
            let mut resume = sample_resume(template);
            resume.summary.clear();
            resume.work_experience.clear();
            resume.education.clear();
            resume.skills.clear();

            let lines = render(&resume).text_lines().join("\n");
            for heading in ["Summary", "Experience", "Education", "Skills", "About Me"] {
                assert!(!lines.contains(heading), "{template:?} still shows {heading}");
            }
        }
    }

    #[test]
    fn test_blank_resume_renders_one_page() {
        for template in ResumeTemplate::ALL {
            let mut resume = Resume::empty();
            resume.template = template;
            let doc = render(&resume);
            assert_eq!(doc.height, PAGE_HEIGHT_PX);
            assert!(!doc.elements.is_empty(), "{template:?} has no background");
        }
    }

    #[test]
    fn test_long_history_grows_past_one_page() {
        for template in ResumeTemplate::ALL {
            let mut resume = sample_resume(template);
            let description = "Designed, built and operated services.\n".repeat(6);
            resume.work_experience = (0..12)
                .map(|i| job(&format!("Engineer {i}"), "Acme", &description))
                .collect();
            let doc = render(&resume);
            assert!(doc.height > PAGE_HEIGHT_PX, "{template:?} did not grow");

            let lowest_text = doc
                .elements
                .iter()
                .filter_map(|e| match e {
                    Element::Text { y, .. } => Some(*y),
                    _ => None,
                })
                .fold(0.0_f32, f32::max);
            assert!(lowest_text < doc.height);
        }
    }

    #[test]
    fn test_text_stays_inside_page_width() {
        for template in ResumeTemplate::ALL {
            let mut resume = sample_resume(template);
            resume.summary = "word ".repeat(300);
            let doc = render(&resume);
            for element in &doc.elements {
                if let Element::Text { x, .. } = element {
                    assert!(*x >= 0.0 && *x <= PAGE_WIDTH_PX, "{template:?} text at x={x}");
                }
            }
        }
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let resume = sample_resume(ResumeTemplate::Creative);
        assert_eq!(render(&resume), render(&resume));
    }
}
