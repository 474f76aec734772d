//! Vector output for EPS, PDF and TeX.
//!
//! [`VectorBackend`] records what plotters draws as a flat list of
//! [`Primitive`]s in a [`Scene`]; the scene is then written out in the
//! requested page description language. Coordinates are in points with the
//! origin at the top left, as plotters produces them, and are flipped on
//! output.

use pdf_writer::types::{LineCapStyle, LineJoinStyle};
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};
use plotters_backend::text_anchor::{HPos, VPos};
use plotters_backend::{
    BackendColor, BackendCoord, BackendStyle, BackendTextStyle, DrawingBackend, DrawingErrorKind,
    FontTransform,
};
use std::collections::BTreeSet;
use std::fmt::Write;
use std::io;

/// Average Helvetica glyph advance, relative to the font size.
const GLYPH_ADVANCE: f64 = 0.55;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Flattens a translucent color onto the white page.
    fn over_white(color: BackendColor) -> Option<Rgb> {
        let alpha = color.alpha.clamp(0.0, 1.0);
        if alpha == 0.0 {
            return None;
        }
        let blend = |c: u8| (c as f64 * alpha + 255.0 * (1.0 - alpha)).round() as u8;
        let (r, g, b) = color.rgb;
        Some(Rgb(blend(r), blend(g), blend(b)))
    }

    fn unit_f32(self) -> (f32, f32, f32) {
        let (r, g, b) = self.unit();
        (r as f32, g as f32, b as f32)
    }

    fn unit(self) -> (f64, f64, f64) {
        (
            self.0 as f64 / 255.0,
            self.1 as f64 / 255.0,
            self.2 as f64 / 255.0,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VAlign {
    Top,
    Center,
    Bottom,
}

impl HAlign {
    fn factor(self) -> f64 {
        match self {
            HAlign::Left => 0.0,
            HAlign::Center => -0.5,
            HAlign::Right => -1.0,
        }
    }
}

impl VAlign {
    /// Baseline offset (upwards, in font sizes) from the anchor point.
    fn baseline(self) -> f64 {
        match self {
            VAlign::Top => -0.75,
            VAlign::Center => -0.35,
            VAlign::Bottom => 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Primitive {
    Stroke {
        points: Vec<(f64, f64)>,
        color: Rgb,
        width: f64,
        closed: bool,
    },
    Fill {
        points: Vec<(f64, f64)>,
        color: Rgb,
    },
    Circle {
        center: (f64, f64),
        radius: f64,
        color: Rgb,
        width: f64,
        fill: bool,
    },
    Text {
        text: String,
        at: (f64, f64),
        size: f64,
        color: Rgb,
        h_align: HAlign,
        v_align: VAlign,
        /// Counter-clockwise, in degrees.
        rotation: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Scene {
    width: f64,
    height: f64,
    primitives: Vec<Primitive>,
}

impl Scene {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f64,
            height: height as f64,
            primitives: Vec::new(),
        }
    }

    fn flip(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (x, self.height - y)
    }

    pub(crate) fn to_eps(&self) -> Vec<u8> {
        let mut out = String::new();
        let _ = writeln!(out, "%!PS-Adobe-3.0 EPSF-3.0");
        let _ = writeln!(
            out,
            "%%BoundingBox: 0 0 {} {}",
            self.width.ceil() as u32,
            self.height.ceil() as u32
        );
        let _ = writeln!(out, "%%HiResBoundingBox: 0 0 {} {}", num(self.width), num(self.height));
        let _ = writeln!(out, "%%Creator: memplot");
        let _ = writeln!(out, "%%EndComments");
        let _ = writeln!(out, "1 setlinejoin 1 setlinecap");

        for primitive in &self.primitives {
            match primitive {
                Primitive::Stroke {
                    points,
                    color,
                    width,
                    closed,
                } => {
                    set_ps_color(&mut out, *color, "setrgbcolor");
                    let _ = writeln!(out, "{} setlinewidth", num(*width));
                    self.eps_path(&mut out, points);
                    if *closed {
                        out.push_str("closepath ");
                    }
                    out.push_str("stroke\n");
                }
                Primitive::Fill { points, color } => {
                    set_ps_color(&mut out, *color, "setrgbcolor");
                    self.eps_path(&mut out, points);
                    out.push_str("closepath fill\n");
                }
                Primitive::Circle {
                    center,
                    radius,
                    color,
                    width,
                    fill,
                } => {
                    let (cx, cy) = self.flip(*center);
                    set_ps_color(&mut out, *color, "setrgbcolor");
                    let _ = writeln!(out, "{} setlinewidth", num(*width));
                    let _ = writeln!(
                        out,
                        "newpath {} {} {} 0 360 arc {}",
                        num(cx),
                        num(cy),
                        num(*radius),
                        if *fill { "fill" } else { "stroke" }
                    );
                }
                Primitive::Text {
                    text,
                    at,
                    size,
                    color,
                    h_align,
                    v_align,
                    rotation,
                } => {
                    let (x, y) = self.flip(*at);
                    let _ = writeln!(out, "gsave {} {} translate {} rotate", num(x), num(y), num(*rotation));
                    let _ = writeln!(out, "/Helvetica findfont {} scalefont setfont", num(*size));
                    set_ps_color(&mut out, *color, "setrgbcolor");
                    let _ = writeln!(
                        out,
                        "({}) dup stringwidth pop {} mul {} moveto show grestore",
                        escape_ps(text),
                        num(h_align.factor()),
                        num(v_align.baseline() * size)
                    );
                }
            }
        }

        out.push_str("showpage\n%%EOF\n");
        out.into_bytes()
    }

    pub(crate) fn to_pdf(&self) -> Vec<u8> {
        let catalog_id = Ref::new(1);
        let page_tree_id = Ref::new(2);
        let page_id = Ref::new(3);
        let content_id = Ref::new(4);
        let font_id = Ref::new(5);
        let font_name = Name(b"F1");

        let mut content = Content::new();
        content.set_line_join(LineJoinStyle::RoundJoin);
        content.set_line_cap(LineCapStyle::RoundCap);
        for primitive in &self.primitives {
            match primitive {
                Primitive::Stroke {
                    points,
                    color,
                    width,
                    closed,
                } => {
                    let (r, g, b) = color.unit_f32();
                    content.set_stroke_rgb(r, g, b);
                    content.set_line_width(*width as f32);
                    self.pdf_path(&mut content, points);
                    if *closed {
                        content.close_and_stroke();
                    } else {
                        content.stroke();
                    }
                }
                Primitive::Fill { points, color } => {
                    let (r, g, b) = color.unit_f32();
                    content.set_fill_rgb(r, g, b);
                    self.pdf_path(&mut content, points);
                    content.close_path();
                    content.fill_nonzero();
                }
                Primitive::Circle {
                    center,
                    radius,
                    color,
                    width,
                    fill,
                } => {
                    let (cx, cy) = self.flip(*center);
                    let (r, g, b) = color.unit_f32();
                    if *fill {
                        content.set_fill_rgb(r, g, b);
                    } else {
                        content.set_stroke_rgb(r, g, b);
                    }
                    content.set_line_width(*width as f32);
                    pdf_circle(&mut content, cx, cy, *radius);
                    if *fill {
                        content.fill_nonzero();
                    } else {
                        content.stroke();
                    }
                }
                Primitive::Text {
                    text,
                    at,
                    size,
                    color,
                    h_align,
                    v_align,
                    rotation,
                } => {
                    let (x, y) = self.flip(*at);
                    let advance = estimate_width(text, *size);
                    let (dx, dy) = (h_align.factor() * advance, v_align.baseline() * size);
                    let (sin, cos) = rotation.to_radians().sin_cos();
                    let origin = (x + dx * cos - dy * sin, y + dx * sin + dy * cos);
                    let (r, g, b) = color.unit_f32();
                    content.set_fill_rgb(r, g, b);
                    content.begin_text();
                    content.set_font(font_name, *size as f32);
                    content.set_text_matrix([
                        cos as f32,
                        sin as f32,
                        -sin as f32,
                        cos as f32,
                        origin.0 as f32,
                        origin.1 as f32,
                    ]);
                    content.show(Str(ascii_lossy(text).as_bytes()));
                    content.end_text();
                }
            }
        }
        let content = content.finish();

        let mut pdf = Pdf::new();
        pdf.set_version(1, 4);
        pdf.catalog(catalog_id).pages(page_tree_id);
        pdf.pages(page_tree_id).kids([page_id]).count(1);
        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, self.width as f32, self.height as f32));
        page.parent(page_tree_id);
        page.contents(content_id);
        page.resources().fonts().pair(font_name, font_id);
        page.finish();
        pdf.type1_font(font_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.stream(content_id, &content);
        pdf.finish()
    }

    /// A standalone `tikzpicture`, to be `\input` from a document that loads
    /// TikZ.
    pub(crate) fn to_tikz(&self) -> Vec<u8> {
        let colors: BTreeSet<Rgb> = self
            .primitives
            .iter()
            .map(|p| match p {
                Primitive::Stroke { color, .. }
                | Primitive::Fill { color, .. }
                | Primitive::Circle { color, .. }
                | Primitive::Text { color, .. } => *color,
            })
            .collect();
        let color_name = |c: &Rgb| format!("mp{:02x}{:02x}{:02x}", c.0, c.1, c.2);

        let mut out = String::from("% Generated by memplot\n");
        for color in &colors {
            let _ = writeln!(
                out,
                "\\definecolor{{{}}}{{RGB}}{{{},{},{}}}",
                color_name(color),
                color.0,
                color.1,
                color.2
            );
        }
        out.push_str("\\begin{tikzpicture}[x=1pt,y=1pt]\n");
        let _ = writeln!(
            out,
            "\\path[use as bounding box] (0,0) rectangle ({},{});",
            num(self.width),
            num(self.height)
        );

        for primitive in &self.primitives {
            match primitive {
                Primitive::Stroke {
                    points,
                    color,
                    width,
                    closed,
                } => {
                    let _ = write!(
                        out,
                        "\\draw[line width={}pt,draw={}] {}",
                        num(*width),
                        color_name(color),
                        self.tikz_path(points)
                    );
                    out.push_str(if *closed { " -- cycle;\n" } else { ";\n" });
                }
                Primitive::Fill { points, color } => {
                    let _ = writeln!(
                        out,
                        "\\fill[{}] {} -- cycle;",
                        color_name(color),
                        self.tikz_path(points)
                    );
                }
                Primitive::Circle {
                    center,
                    radius,
                    color,
                    width,
                    fill,
                } => {
                    let (cx, cy) = self.flip(*center);
                    let command = if *fill { "fill" } else { "draw" };
                    let _ = writeln!(
                        out,
                        "\\{}[line width={}pt,{}] ({},{}) circle ({});",
                        command,
                        num(*width),
                        color_name(color),
                        num(cx),
                        num(cy),
                        num(*radius)
                    );
                }
                Primitive::Text {
                    text,
                    at,
                    size,
                    color,
                    h_align,
                    v_align,
                    rotation,
                } => {
                    let (x, y) = self.flip(*at);
                    let _ = writeln!(
                        out,
                        "\\node[anchor={},rotate={},inner sep=0pt,text={},font=\\fontsize{{{}}}{{{}}}\\selectfont] at ({},{}) {{{}}};",
                        tikz_anchor(*h_align, *v_align),
                        num(*rotation),
                        color_name(color),
                        num(*size),
                        num(size * 1.2),
                        num(x),
                        num(y),
                        escape_tex(text)
                    );
                }
            }
        }

        out.push_str("\\end{tikzpicture}\n");
        out.into_bytes()
    }

    fn eps_path(&self, out: &mut String, points: &[(f64, f64)]) {
        out.push_str("newpath ");
        for (i, point) in points.iter().enumerate() {
            let (x, y) = self.flip(*point);
            let op = if i == 0 { "moveto" } else { "lineto" };
            let _ = write!(out, "{} {} {} ", num(x), num(y), op);
        }
    }

    fn pdf_path(&self, content: &mut Content, points: &[(f64, f64)]) {
        for (i, point) in points.iter().enumerate() {
            let (x, y) = self.flip(*point);
            if i == 0 {
                content.move_to(x as f32, y as f32);
            } else {
                content.line_to(x as f32, y as f32);
            }
        }
    }

    fn tikz_path(&self, points: &[(f64, f64)]) -> String {
        points
            .iter()
            .map(|p| {
                let (x, y) = self.flip(*p);
                format!("({},{})", num(x), num(y))
            })
            .collect::<Vec<_>>()
            .join(" -- ")
    }
}

/// A plotters backend that records into a [`Scene`].
pub(crate) struct VectorBackend<'a> {
    size: (u32, u32),
    scene: &'a mut Scene,
}

impl<'a> VectorBackend<'a> {
    pub(crate) fn new(scene: &'a mut Scene) -> Self {
        let size = (scene.width as u32, scene.height as u32);
        Self { size, scene }
    }

    fn push(&mut self, primitive: Primitive) {
        self.scene.primitives.push(primitive);
    }
}

fn to_f64((x, y): BackendCoord) -> (f64, f64) {
    (x as f64, y as f64)
}

impl<'a> DrawingBackend for VectorBackend<'a> {
    type ErrorType = io::Error;

    fn get_size(&self) -> (u32, u32) {
        self.size
    }

    fn ensure_prepared(&mut self) -> Result<(), DrawingErrorKind<io::Error>> {
        Ok(())
    }

    fn present(&mut self) -> Result<(), DrawingErrorKind<io::Error>> {
        Ok(())
    }

    fn draw_pixel(
        &mut self,
        point: BackendCoord,
        color: BackendColor,
    ) -> Result<(), DrawingErrorKind<io::Error>> {
        if let Some(color) = Rgb::over_white(color) {
            let (x, y) = to_f64(point);
            self.push(Primitive::Fill {
                points: vec![(x, y), (x + 1.0, y), (x + 1.0, y + 1.0), (x, y + 1.0)],
                color,
            });
        }
        Ok(())
    }

    fn draw_line<S: BackendStyle>(
        &mut self,
        from: BackendCoord,
        to: BackendCoord,
        style: &S,
    ) -> Result<(), DrawingErrorKind<io::Error>> {
        if let Some(color) = Rgb::over_white(style.color()) {
            self.push(Primitive::Stroke {
                points: vec![to_f64(from), to_f64(to)],
                color,
                width: style.stroke_width() as f64,
                closed: false,
            });
        }
        Ok(())
    }

    fn draw_rect<S: BackendStyle>(
        &mut self,
        upper_left: BackendCoord,
        bottom_right: BackendCoord,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<io::Error>> {
        let Some(color) = Rgb::over_white(style.color()) else {
            return Ok(());
        };
        let (x0, y0) = to_f64(upper_left);
        let (x1, y1) = to_f64(bottom_right);
        let points = vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1)];
        self.push(if fill {
            Primitive::Fill { points, color }
        } else {
            Primitive::Stroke {
                points,
                color,
                width: style.stroke_width() as f64,
                closed: true,
            }
        });
        Ok(())
    }

    fn draw_path<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        path: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<io::Error>> {
        let Some(color) = Rgb::over_white(style.color()) else {
            return Ok(());
        };
        let points: Vec<_> = path.into_iter().map(to_f64).collect();
        if points.len() >= 2 {
            self.push(Primitive::Stroke {
                points,
                color,
                width: style.stroke_width() as f64,
                closed: false,
            });
        }
        Ok(())
    }

    fn draw_circle<S: BackendStyle>(
        &mut self,
        center: BackendCoord,
        radius: u32,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<io::Error>> {
        if let Some(color) = Rgb::over_white(style.color()) {
            self.push(Primitive::Circle {
                center: to_f64(center),
                radius: radius as f64,
                color,
                width: style.stroke_width() as f64,
                fill,
            });
        }
        Ok(())
    }

    fn fill_polygon<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        vert: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<io::Error>> {
        let Some(color) = Rgb::over_white(style.color()) else {
            return Ok(());
        };
        let points: Vec<_> = vert.into_iter().map(to_f64).collect();
        if points.len() >= 3 {
            self.push(Primitive::Fill { points, color });
        }
        Ok(())
    }

    fn draw_text<TStyle: BackendTextStyle>(
        &mut self,
        text: &str,
        style: &TStyle,
        pos: BackendCoord,
    ) -> Result<(), DrawingErrorKind<io::Error>> {
        let Some(color) = Rgb::over_white(style.color()) else {
            return Ok(());
        };
        let anchor = style.anchor();
        let h_align = match anchor.h_pos {
            HPos::Left => HAlign::Left,
            HPos::Center => HAlign::Center,
            HPos::Right => HAlign::Right,
        };
        let v_align = match anchor.v_pos {
            VPos::Top => VAlign::Top,
            VPos::Center => VAlign::Center,
            VPos::Bottom => VAlign::Bottom,
        };
        // plotters rotates clockwise on a y-down canvas.
        let rotation = match style.transform() {
            FontTransform::Rotate90 => -90.0,
            FontTransform::Rotate180 => -180.0,
            FontTransform::Rotate270 => -270.0,
            _ => 0.0,
        };

        self.push(Primitive::Text {
            text: text.to_string(),
            at: to_f64(pos),
            size: style.size(),
            color,
            h_align,
            v_align,
            rotation,
        });
        Ok(())
    }
}

fn num(value: f64) -> String {
    let value = if value.abs() < 0.005 { 0.0 } else { value };
    let text = format!("{:.2}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn set_ps_color(out: &mut String, color: Rgb, op: &str) {
    let (r, g, b) = color.unit();
    let _ = writeln!(out, "{} {} {} {}", num(r), num(g), num(b), op);
}

/// Four Bezier quadrants approximating a circle.
fn pdf_circle(content: &mut Content, cx: f64, cy: f64, r: f64) {
    let k = 0.552_284_75 * r;
    content.move_to((cx + r) as f32, cy as f32);
    let quadrants = [
        ((cx + r, cy + k), (cx + k, cy + r), (cx, cy + r)),
        ((cx - k, cy + r), (cx - r, cy + k), (cx - r, cy)),
        ((cx - r, cy - k), (cx - k, cy - r), (cx, cy - r)),
        ((cx + k, cy - r), (cx + r, cy - k), (cx + r, cy)),
    ];
    for (c1, c2, end) in quadrants {
        content.cubic_to(
            c1.0 as f32,
            c1.1 as f32,
            c2.0 as f32,
            c2.1 as f32,
            end.0 as f32,
            end.1 as f32,
        );
    }
}

fn estimate_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * GLYPH_ADVANCE
}

/// Helvetica in WinAnsi only covers ASCII reliably.
fn ascii_lossy(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c } else { '?' })
        .collect()
}

/// PostScript literal strings; non-ASCII is replaced.
fn escape_ps(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            c if c.is_ascii() && !c.is_ascii_control() => escaped.push(c),
            _ => escaped.push('?'),
        }
    }
    escaped
}

fn escape_tex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\textbackslash{}"),
            '~' => escaped.push_str("\\textasciitilde{}"),
            '^' => escaped.push_str("\\textasciicircum{}"),
            '{' | '}' | '$' | '&' | '#' | '_' | '%' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

fn tikz_anchor(h_align: HAlign, v_align: VAlign) -> &'static str {
    match (v_align, h_align) {
        (VAlign::Top, HAlign::Left) => "north west",
        (VAlign::Top, HAlign::Center) => "north",
        (VAlign::Top, HAlign::Right) => "north east",
        (VAlign::Center, HAlign::Left) => "west",
        (VAlign::Center, HAlign::Center) => "center",
        (VAlign::Center, HAlign::Right) => "east",
        (VAlign::Bottom, HAlign::Left) => "south west",
        (VAlign::Bottom, HAlign::Center) => "south",
        (VAlign::Bottom, HAlign::Right) => "south east",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        let mut scene = Scene::new(200, 100);
        scene.primitives = vec![
            Primitive::Stroke {
                points: vec![(10.0, 10.0), (190.0, 90.0)],
                color: Rgb(0, 0, 255),
                width: 1.0,
                closed: false,
            },
            Primitive::Fill {
                points: vec![(0.0, 0.0), (5.0, 0.0), (5.0, 5.0)],
                color: Rgb(255, 255, 255),
            },
            Primitive::Text {
                text: "RSS (KiB) 100%".to_string(),
                at: (50.0, 20.0),
                size: 12.0,
                color: Rgb(0, 0, 0),
                h_align: HAlign::Center,
                v_align: VAlign::Top,
                rotation: 90.0,
            },
        ];
        scene
    }

    #[test]
    fn translucent_colors_are_flattened_onto_white() {
        let half_black = BackendColor {
            alpha: 0.5,
            rgb: (0, 0, 0),
        };
        assert_eq!(Rgb::over_white(half_black), Some(Rgb(128, 128, 128)));
        let invisible = BackendColor {
            alpha: 0.0,
            rgb: (0, 0, 0),
        };
        assert_eq!(Rgb::over_white(invisible), None);
    }

    #[test]
    fn eps_flips_the_y_axis_and_escapes_text() {
        let eps = String::from_utf8(scene().to_eps()).unwrap();
        assert!(eps.starts_with("%!PS-Adobe-3.0 EPSF-3.0\n%%BoundingBox: 0 0 200 100\n"));
        assert!(eps.contains("newpath 10 90 moveto 190 10 lineto stroke"));
        assert!(eps.contains("(RSS \\(KiB\\) 100%)"));
        assert!(eps.ends_with("showpage\n%%EOF\n"));
    }

    #[test]
    fn pdf_has_one_page_with_the_drawing() {
        let pdf = scene().to_pdf();
        let text = String::from_utf8_lossy(&pdf);
        assert!(text.starts_with("%PDF-1.4\n"));
        assert!(text.contains("/MediaBox [0 0 200 100]"));
        assert!(text.contains("/BaseFont /Helvetica"));
        assert!(text.contains("10 90 m\n190 10 l\nS"));
        assert!(text.contains("(RSS (KiB) 100%) Tj"));
        assert!(text.trim_end().ends_with("%%EOF"));
    }

    #[test]
    fn pdf_text_outside_ascii_is_replaced() {
        assert_eq!(ascii_lossy("Größe\t"), "Gr??e?");
    }

    #[test]
    fn tikz_defines_colors_and_escapes_text() {
        let tex = String::from_utf8(scene().to_tikz()).unwrap();
        assert!(tex.contains("\\definecolor{mp0000ff}{RGB}{0,0,255}"));
        assert!(tex.contains("\\begin{tikzpicture}[x=1pt,y=1pt]"));
        assert!(tex.contains("(10,90) -- (190,10);"));
        assert!(tex.contains("anchor=north,rotate=90"));
        assert!(tex.contains("{RSS (KiB) 100\\%}"));
        assert!(tex.trim_end().ends_with("\\end{tikzpicture}"));
    }

    #[test]
    fn numbers_are_compact() {
        assert_eq!(num(10.0), "10");
        assert_eq!(num(0.5), "0.5");
        assert_eq!(num(1.0 / 3.0), "0.33");
        assert_eq!(num(-0.001), "0");
    }
}
