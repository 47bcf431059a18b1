//! Block layout primitives shared by the templates.
//!
//! Templates flow top to bottom: each helper takes the top edge of the block
//! it draws and returns the y coordinate just below it.

use crate::models::{PersonalInfo, Resume, ResumeTemplate};
use crate::render::font_metrics::get_metrics;
use crate::render::{
    Anchor, Color, Element, Paint, RenderedDocument, TextStyle, PAGE_HEIGHT_PX, PAGE_WIDTH_PX,
};

/// Baseline offset inside a line box, as a fraction of font size.
const BASELINE_RATIO: f32 = 0.8;

#[derive(Debug, Default)]
pub struct Canvas {
    elements: Vec<Element>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Position to later insert a background behind everything drawn after it.
    pub fn mark(&self) -> usize {
        self.elements.len()
    }

    pub fn insert_behind(&mut self, mark: usize, element: Element) {
        let at = mark.min(self.elements.len());
        self.elements.insert(at, element);
    }

    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, fill: impl Into<Paint>, radius: f32) {
        self.push(Element::Rect {
            x,
            y,
            width,
            height,
            fill: fill.into(),
            radius,
        });
    }

    pub fn hline(&mut self, x1: f32, x2: f32, y: f32, stroke: Color, width: f32) {
        self.push(Element::Line {
            x1,
            y1: y,
            x2,
            y2: y,
            stroke,
            width,
        });
    }

    pub fn vline(&mut self, x: f32, y1: f32, y2: f32, stroke: Color, width: f32) {
        self.push(Element::Line {
            x1: x,
            y1,
            x2: x,
            y2,
            stroke,
            width,
        });
    }

    pub fn circle(&mut self, cx: f32, cy: f32, r: f32, fill: Color) {
        self.push(Element::Circle { cx, cy, r, fill });
    }

    /// One line of text whose line box starts at `top`. `x` is interpreted
    /// through the style's anchor. Blank text draws nothing and takes no space.
    pub fn line(&mut self, x: f32, top: f32, text: &str, style: TextStyle) -> f32 {
        if text.trim().is_empty() {
            return top;
        }
        self.push(Element::Text {
            x,
            y: baseline(top, &style),
            content: text.to_string(),
            style,
        });
        top + style.line_height()
    }

    /// Word-wrapped paragraph inside `[x, x + width]`. Explicit line breaks are
    /// kept. Blank text draws nothing and takes no space.
    pub fn paragraph(&mut self, x: f32, top: f32, width: f32, text: &str, style: TextStyle) -> f32 {
        if text.trim().is_empty() {
            return top;
        }
        let lines = get_metrics(style.family).wrap(
            text.trim_matches('\n'),
            style.size,
            style.weight.is_heavy(),
            width,
        );
        let anchor_x = match style.anchor {
            Anchor::Start => x,
            Anchor::Middle => x + width / 2.0,
            Anchor::End => x + width,
        };
        let mut y = top;
        for line in lines {
            if !line.is_empty() {
                self.push(Element::Text {
                    x: anchor_x,
                    y: baseline(y, &style),
                    content: line,
                    style,
                });
            }
            y += style.line_height();
        }
        y
    }

    /// Inline items separated by `gap`, wrapping onto new rows like a
    /// flex-wrap container. Rows are centred when the style anchor is Middle.
    pub fn inline_row(
        &mut self,
        x: f32,
        top: f32,
        width: f32,
        items: &[String],
        gap: f32,
        style: TextStyle,
    ) -> f32 {
        let metrics = get_metrics(style.family);
        let heavy = style.weight.is_heavy();
        let rows = pack_rows(items, width, gap, |item| {
            metrics.width_px(item, style.size, heavy)
        });

        let mut y = top;
        for row in rows {
            let row_width: f32 = row.iter().map(|(_, w)| w).sum::<f32>()
                + gap * row.len().saturating_sub(1) as f32;
            let mut cursor = match style.anchor {
                Anchor::Middle => x + (width - row_width) / 2.0,
                Anchor::End => x + width - row_width,
                Anchor::Start => x,
            };
            for (item, item_width) in row {
                self.push(Element::Text {
                    x: cursor,
                    y: baseline(y, &style),
                    content: item.to_string(),
                    style: style.anchor(Anchor::Start),
                });
                cursor += item_width + gap;
            }
            y += style.line_height();
        }
        y
    }

    /// Rounded pills around each item, flowing left to right.
    #[allow(clippy::too_many_arguments)]
    pub fn chips(
        &mut self,
        x: f32,
        top: f32,
        width: f32,
        items: &[String],
        style: TextStyle,
        fill: Color,
        pad_x: f32,
        pad_y: f32,
    ) -> f32 {
        const GAP: f32 = 8.0;
        let metrics = get_metrics(style.family);
        let heavy = style.weight.is_heavy();
        let chip_height = style.line_height() + pad_y * 2.0;
        let rows = pack_rows(items, width, GAP, |item| {
            (metrics.width_px(item, style.size, heavy) + pad_x * 2.0).min(width)
        });
        if rows.is_empty() {
            return top;
        }

        let mut y = top;
        for row in rows {
            let mut cursor = x;
            for (item, chip_width) in row {
                self.rect(cursor, y, chip_width, chip_height, fill, chip_height / 2.0);
                self.push(Element::Text {
                    x: cursor + pad_x,
                    y: baseline(y + pad_y, &style),
                    content: item.to_string(),
                    style: style.anchor(Anchor::Start),
                });
                cursor += chip_width + GAP;
            }
            y += chip_height + GAP;
        }
        y - GAP
    }

    /// Horizontal level bar: a rounded track with a fill of `level * 20%`.
    pub fn level_bar(&mut self, x: f32, top: f32, width: f32, level: i32, track: Color, fill: Color) -> f32 {
        const BAR_HEIGHT: f32 = 6.0;
        self.rect(x, top, width, BAR_HEIGHT, track, BAR_HEIGHT / 2.0);
        let filled = width * level_fraction(level);
        if filled > 0.0 {
            self.rect(x, top, filled, BAR_HEIGHT, fill, BAR_HEIGHT / 2.0);
        }
        top + BAR_HEIGHT
    }

    /// Wraps up the drawing. Full-height backgrounds from `backgrounds` are
    /// painted first, sized to the final document height.
    pub fn finish<F>(self, template: ResumeTemplate, content_bottom: f32, backgrounds: F) -> RenderedDocument
    where
        F: FnOnce(f32) -> Vec<Element>,
    {
        let mut elements = backgrounds(content_bottom.max(PAGE_HEIGHT_PX));
        elements.extend(self.elements);
        RenderedDocument::new(template, content_bottom, elements)
    }
}

fn baseline(top: f32, style: &TextStyle) -> f32 {
    top + (style.line_height() - style.size) / 2.0 + style.size * BASELINE_RATIO
}

/// Fill fraction for a skill level, clamped for drawing only.
pub fn level_fraction(level: i32) -> f32 {
    (level as f32 / 5.0).clamp(0.0, 1.0)
}

fn pack_rows<'a, F>(items: &'a [String], width: f32, gap: f32, measure: F) -> Vec<Vec<(&'a str, f32)>>
where
    F: Fn(&str) -> f32,
{
    let mut rows: Vec<Vec<(&str, f32)>> = Vec::new();
    let mut row_width = 0.0_f32;
    for item in items.iter().map(String::as_str).filter(|s| !s.trim().is_empty()) {
        let w = measure(item);
        let fits = rows
            .last()
            .is_some_and(|row| !row.is_empty() && row_width + gap + w <= width);
        match rows.last_mut() {
            Some(row) if fits => {
                row.push((item, w));
                row_width += gap + w;
            }
            _ => {
                rows.push(vec![(item, w)]);
                row_width = w;
            }
        }
    }
    rows
}

/// Full-page solid background.
pub fn page_background(height: f32, fill: Color) -> Element {
    Element::Rect {
        x: 0.0,
        y: 0.0,
        width: PAGE_WIDTH_PX,
        height,
        fill: Paint::Solid(fill),
        radius: 0.0,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Resume text helpers
// ────────────────────────────────────────────────────────────────────────────

/// `Degree in Field`, or just the degree.
pub fn degree_line(degree: &str, field_of_study: &str) -> String {
    if field_of_study.trim().is_empty() {
        degree.to_string()
    } else {
        format!("{degree} in {field_of_study}")
    }
}

/// `City, Province Postal`; empty when city and province are both blank.
pub fn city_line(info: &PersonalInfo) -> String {
    if info.city.trim().is_empty() && info.province.trim().is_empty() {
        return String::new();
    }
    let separator = if !info.city.trim().is_empty() && !info.province.trim().is_empty() {
        ", "
    } else {
        ""
    };
    format!(
        "{}{}{} {}",
        info.city.trim(),
        separator,
        info.province.trim(),
        info.postal_code.trim()
    )
    .trim()
    .to_string()
}

/// Email, phone, location and website, blanks dropped.
pub fn contact_items(info: &PersonalInfo) -> Vec<String> {
    [
        Some(info.email.as_str()),
        Some(info.phone.as_str()),
        info.location.as_deref(),
        info.website.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(str::to_string)
    .collect()
}

pub fn skill_names(resume: &Resume) -> Vec<String> {
    resume
        .skills
        .iter()
        .map(|s| s.name.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
