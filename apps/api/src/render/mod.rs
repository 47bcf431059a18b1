// Template Renderer: projects a Resume onto an A4-wide display list.
// Rendering is pure and CPU-bound; handlers call it inside spawn_blocking.

pub mod dates;
pub mod font_metrics;
pub mod handlers;
pub mod layout;
pub mod templates;

use crate::models::{Resume, ResumeTemplate};

pub use font_metrics::FontFamily;

/// CSS pixels per millimetre at 96 DPI.
pub const PX_PER_MM: f32 = 96.0 / 25.4;
/// 210mm.
pub const PAGE_WIDTH_PX: f32 = 210.0 * PX_PER_MM;
/// 297mm. Documents are never shorter than one page.
pub const PAGE_HEIGHT_PX: f32 = 297.0 * PX_PER_MM;

/// Line box height as a multiple of font size.
pub const LINE_HEIGHT: f32 = 1.4;

// ────────────────────────────────────────────────────────────────────────────
// Display list
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const WHITE: Color = Color(0xff, 0xff, 0xff);

    pub const fn hex(rgb: u32) -> Color {
        Color((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    pub fn css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Left-to-right linear gradient.
    Gradient(Color, Color),
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Light,
    Normal,
    Medium,
    Semibold,
    Bold,
}

impl FontWeight {
    pub fn css(&self) -> u16 {
        match self {
            FontWeight::Light => 300,
            FontWeight::Normal => 400,
            FontWeight::Medium => 500,
            FontWeight::Semibold => 600,
            FontWeight::Bold => 700,
        }
    }

    /// Whether the wide advance approximation applies.
    pub fn is_heavy(&self) -> bool {
        matches!(self, FontWeight::Semibold | FontWeight::Bold)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn css(&self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub family: FontFamily,
    pub size: f32,
    pub weight: FontWeight,
    pub color: Color,
    pub anchor: Anchor,
}

impl TextStyle {
    pub fn new(family: FontFamily, size: f32, color: Color) -> Self {
        Self {
            family,
            size,
            weight: FontWeight::Normal,
            color,
            anchor: Anchor::Start,
        }
    }

    pub fn weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn line_height(&self) -> f32 {
        self.size * LINE_HEIGHT
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Paint,
        radius: f32,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Color,
        width: f32,
    },
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        fill: Color,
    },
    /// One line of text; `y` is the baseline.
    Text {
        x: f32,
        y: f32,
        content: String,
        style: TextStyle,
    },
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        href: String,
    },
}

/// A laid-out resume: fixed A4 width, content-driven height.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    pub template: ResumeTemplate,
    pub width: f32,
    pub height: f32,
    pub elements: Vec<Element>,
    view_scale: Option<f32>,
}

impl RenderedDocument {
    pub fn new(template: ResumeTemplate, height: f32, elements: Vec<Element>) -> Self {
        Self {
            template,
            width: PAGE_WIDTH_PX,
            height: height.max(PAGE_HEIGHT_PX),
            elements,
            view_scale: None,
        }
    }

    /// Attaches an on-screen zoom factor. Geometry is unchanged; only the
    /// serialized SVG is wrapped in a scale transform.
    pub fn with_view_scale(mut self, scale: f32) -> Self {
        self.view_scale = (scale.is_finite() && scale > 0.0 && scale != 1.0).then_some(scale);
        self
    }

    pub fn view_scale(&self) -> Option<f32> {
        self.view_scale
    }

    /// Copy of the document at its natural size.
    pub fn without_view_transform(&self) -> Self {
        Self {
            view_scale: None,
            ..self.clone()
        }
    }

    /// Text runs in paint order.
    #[cfg(test)]
    pub fn text_lines(&self) -> Vec<&str> {
        self.elements
            .iter()
            .filter_map(|e| match e {
                Element::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn to_svg(&self) -> String {
        let scale = self.view_scale.unwrap_or(1.0);
        let mut svg = String::with_capacity(self.elements.len() * 160 + 512);
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" \
             width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
            w = num(self.width * scale),
            h = num(self.height * scale),
        ));

        let mut gradients = Vec::new();
        for element in &self.elements {
            if let Element::Rect {
                fill: Paint::Gradient(from, to),
                ..
            } = element
            {
                if !gradients.contains(&(*from, *to)) {
                    gradients.push((*from, *to));
                }
            }
        }
        if !gradients.is_empty() {
            svg.push_str("<defs>");
            for (i, (from, to)) in gradients.iter().enumerate() {
                svg.push_str(&format!(
                    "<linearGradient id=\"g{i}\" x1=\"0\" y1=\"0\" x2=\"1\" y2=\"0\">\
                     <stop offset=\"0\" stop-color=\"{}\"/><stop offset=\"1\" stop-color=\"{}\"/>\
                     </linearGradient>",
                    from.css(),
                    to.css()
                ));
            }
            svg.push_str("</defs>");
        }

        if self.view_scale.is_some() {
            svg.push_str(&format!("<g transform=\"scale({})\">", num(scale)));
        }

        for element in &self.elements {
            match element {
                Element::Rect {
                    x,
                    y,
                    width,
                    height,
                    fill,
                    radius,
                } => {
                    let fill = match fill {
                        Paint::Solid(color) => color.css(),
                        Paint::Gradient(from, to) => {
                            let idx = gradients
                                .iter()
                                .position(|g| *g == (*from, *to))
                                .unwrap_or_default();
                            format!("url(#g{idx})")
                        }
                    };
                    svg.push_str(&format!(
                        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{fill}\"",
                        num(*x),
                        num(*y),
                        num(*width),
                        num(*height),
                    ));
                    if *radius > 0.0 {
                        svg.push_str(&format!(" rx=\"{}\"", num(*radius)));
                    }
                    svg.push_str("/>");
                }
                Element::Line {
                    x1,
                    y1,
                    x2,
                    y2,
                    stroke,
                    width,
                } => svg.push_str(&format!(
                    "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
                    num(*x1),
                    num(*y1),
                    num(*x2),
                    num(*y2),
                    stroke.css(),
                    num(*width)
                )),
                Element::Circle { cx, cy, r, fill } => svg.push_str(&format!(
                    "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"/>",
                    num(*cx),
                    num(*cy),
                    num(*r),
                    fill.css()
                )),
                Element::Text {
                    x,
                    y,
                    content,
                    style,
                } => svg.push_str(&format!(
                    "<text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"{}\" \
                     fill=\"{}\" text-anchor=\"{}\" xml:space=\"preserve\">{}</text>",
                    num(*x),
                    num(*y),
                    style.family.css_stack(),
                    num(style.size),
                    style.weight.css(),
                    style.color.css(),
                    style.anchor.css(),
                    html_escape::encode_text(content)
                )),
                Element::Image {
                    x,
                    y,
                    width,
                    height,
                    href,
                } => svg.push_str(&format!(
                    "<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" \
                     preserveAspectRatio=\"xMidYMid slice\" xlink:href=\"{}\"/>",
                    num(*x),
                    num(*y),
                    num(*width),
                    num(*height),
                    html_escape::encode_double_quoted_attribute(href)
                )),
            }
        }

        if self.view_scale.is_some() {
            svg.push_str("</g>");
        }
        svg.push_str("</svg>");
        svg
    }
}

/// Two decimals, trailing zeros dropped.
fn num(value: f32) -> String {
    let s = format!("{value:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Projects `resume` through its own template.
pub fn render(resume: &Resume) -> RenderedDocument {
    render_with_template(resume, resume.template)
}

/// Projects `resume` through `template`, ignoring the stored choice.
pub fn render_with_template(resume: &Resume, template: ResumeTemplate) -> RenderedDocument {
    match template {
        ResumeTemplate::Minimal => templates::minimal::render(resume),
        ResumeTemplate::Professional => templates::professional::render(resume),
        ResumeTemplate::Creative => templates::creative::render(resume),
        ResumeTemplate::Modern => templates::modern::render(resume),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_constants() {
        assert!((PAGE_WIDTH_PX - 793.7).abs() < 0.1);
        assert!((PAGE_HEIGHT_PX - 1122.5).abs() < 0.1);
    }

    #[test]
    fn test_num_formatting() {
        assert_eq!(num(12.0), "12");
        assert_eq!(num(12.5), "12.5");
        assert_eq!(num(793.7007), "793.7");
        assert_eq!(num(-0.001), "0");
    }

    #[test]
    fn test_document_is_at_least_one_page() {
        let doc = RenderedDocument::new(ResumeTemplate::Minimal, 10.0, Vec::new());
        assert_eq!(doc.height, PAGE_HEIGHT_PX);
        let tall = RenderedDocument::new(ResumeTemplate::Minimal, 2000.0, Vec::new());
        assert_eq!(tall.height, 2000.0);
    }

    #[test]
    fn test_svg_escapes_text() {
        let doc = RenderedDocument::new(
            ResumeTemplate::Minimal,
            0.0,
            vec![Element::Text {
                x: 0.0,
                y: 10.0,
                content: "R&D <lead>".to_string(),
                style: TextStyle::new(FontFamily::Sans, 14.0, Color::hex(0x374151)),
            }],
        );
        let svg = doc.to_svg();
        assert!(svg.contains("R&amp;D &lt;lead&gt;"));
        assert!(svg.contains("fill=\"#374151\""));
    }

    #[test]
    fn test_view_scale_wraps_content_without_changing_geometry() {
        let doc = RenderedDocument::new(ResumeTemplate::Modern, 0.0, Vec::new()).with_view_scale(0.5);
        assert_eq!(doc.view_scale(), Some(0.5));
        assert_eq!(doc.width, PAGE_WIDTH_PX);

        let svg = doc.to_svg();
        assert!(svg.contains("<g transform=\"scale(0.5)\">"));
        assert!(svg.contains(&format!("width=\"{}\"", num(PAGE_WIDTH_PX * 0.5))));

        let natural = doc.without_view_transform();
        assert_eq!(natural.view_scale(), None);
        assert!(!natural.to_svg().contains("transform"));
    }

    #[test]
    fn test_unit_or_invalid_scale_is_ignored() {
        let doc = RenderedDocument::new(ResumeTemplate::Minimal, 0.0, Vec::new());
        assert_eq!(doc.clone().with_view_scale(1.0).view_scale(), None);
        assert_eq!(doc.clone().with_view_scale(0.0).view_scale(), None);
        assert_eq!(doc.with_view_scale(f32::NAN).view_scale(), None);
    }

    #[test]
    fn test_gradient_emits_shared_definition() {
        let gradient = Paint::Gradient(Color::hex(0x9333ea), Color::hex(0x4f46e5));
        let rect = |y| Element::Rect {
            x: 0.0,
            y,
            width: 10.0,
            height: 10.0,
            fill: gradient,
            radius: 0.0,
        };
        let doc = RenderedDocument::new(ResumeTemplate::Creative, 0.0, vec![rect(0.0), rect(20.0)]);
        let svg = doc.to_svg();
        assert_eq!(svg.matches("<linearGradient").count(), 1);
        assert_eq!(svg.matches("url(#g0)").count(), 2);
    }

    #[test]
    fn test_render_dispatches_on_stored_template() {
        let mut resume = Resume::empty();
        resume.template = ResumeTemplate::Professional;
        assert_eq!(render(&resume).template, ResumeTemplate::Professional);
        assert_eq!(
            render_with_template(&resume, ResumeTemplate::Creative).template,
            ResumeTemplate::Creative
        );
    }
}
