//! Word cloud rendering: place words on a spiral inside a circle and draw
//! them onto a PNG canvas.

use std::f32::consts::TAU;
use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};
use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};

use crate::config::CloudConfig;
use crate::error::{Error, Result};
use crate::frequency::WordFrequency;

/// Angle advanced per spiral step, in radians.
const SPIRAL_STEP: f32 = 0.1;
/// Distance gained per full turn of the spiral, in pixels.
const SPIRAL_GAP: f32 = 6.0;
/// Side of an occupancy cell, in pixels.
const CELL: u32 = 4;

/// Fonts tried in order when `CloudConfig::font_path` is unset.
pub const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Turns a ranked frequency list into an image file.
pub trait Renderer {
    fn render(&self, words: &[WordFrequency], cloud: &CloudConfig, output: &Path) -> Result<()>;
}

/// Where one word ended up on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub word: String,
    pub count: u32,
    /// Top-left corner of the text box.
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub font_size: f32,
    /// Index into the palette.
    pub color: usize,
}

/// Parse `#RRGGBB` (the `#` is optional).
pub fn parse_hex_color(s: &str) -> Result<Rgb<u8>> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::Config(format!("invalid color {s:?}, expected #RRGGBB")));
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
    match (channel(0), channel(2), channel(4)) {
        (Ok(r), Ok(g), Ok(b)) => Ok(Rgb([r, g, b])),
        _ => Err(Error::Config(format!("invalid color {s:?}, expected #RRGGBB"))),
    }
}

/// Linear font scaling of `count` between the smallest and largest counts.
/// When every count is equal all words get the largest size.
pub fn font_size(count: u32, min_count: u32, max_count: u32, cloud: &CloudConfig) -> f32 {
    if max_count <= min_count {
        return cloud.max_font_size;
    }
    let t = count.clamp(min_count, max_count) - min_count;
    let t = t as f32 / (max_count - min_count) as f32;
    cloud.min_font_size + t * (cloud.max_font_size - cloud.min_font_size)
}

/// Coarse occupancy grid over the canvas.
struct Occupancy {
    cols: u32,
    rows: u32,
    cells: Vec<bool>,
}

impl Occupancy {
    fn new(width: u32, height: u32) -> Self {
        let cols = width.div_ceil(CELL);
        let rows = height.div_ceil(CELL);
        Self {
            cols,
            rows,
            cells: vec![false; (cols * rows) as usize],
        }
    }

    fn cell_range(&self, x: u32, y: u32, w: u32, h: u32) -> (u32, u32, u32, u32) {
        let c0 = x / CELL;
        let r0 = y / CELL;
        let c1 = ((x + w).saturating_sub(1) / CELL).min(self.cols - 1);
        let r1 = ((y + h).saturating_sub(1) / CELL).min(self.rows - 1);
        (c0, r0, c1, r1)
    }

    fn is_free(&self, x: u32, y: u32, w: u32, h: u32) -> bool {
        let (c0, r0, c1, r1) = self.cell_range(x, y, w, h);
        (r0..=r1).all(|r| (c0..=c1).all(|c| !self.cells[(r * self.cols + c) as usize]))
    }

    fn fill(&mut self, x: u32, y: u32, w: u32, h: u32) {
        let (c0, r0, c1, r1) = self.cell_range(x, y, w, h);
        for r in r0..=r1 {
            for c in c0..=c1 {
                self.cells[(r * self.cols + c) as usize] = true;
            }
        }
    }
}

/// Walk an Archimedean spiral out from the centre and return the top-left
/// corner of the first padded box that stays inside the circle and the
/// canvas without touching anything already placed.
fn find_spot(grid: &Occupancy, cloud: &CloudConfig, w: u32, h: u32) -> Option<(u32, u32)> {
    let cx = cloud.width as f32 / 2.0;
    let cy = cloud.height as f32 / 2.0;
    // Past the half-diagonal every spiral point is off the canvas.
    let radius = (cloud.radius as f32).min(cx.hypot(cy));
    let (w, h) = (w as f32, h as f32);

    let mut theta = 0.0f32;
    loop {
        let r = SPIRAL_GAP * theta / TAU;
        if r > radius {
            return None;
        }
        let left = (cx + r * theta.cos() - w / 2.0).round();
        let top = (cy + r * theta.sin() - h / 2.0).round();
        theta += SPIRAL_STEP;

        if left < 0.0 || top < 0.0 || left + w > cloud.width as f32 || top + h > cloud.height as f32 {
            continue;
        }
        let corners = [(left, top), (left + w, top), (left, top + h), (left + w, top + h)];
        let inside = corners
            .iter()
            .all(|&(x, y)| (x - cx).powi(2) + (y - cy).powi(2) <= radius * radius);
        if !inside {
            continue;
        }
        let (x, y) = (left as u32, top as u32);
        if grid.is_free(x, y, w as u32, h as u32) {
            return Some((x, y));
        }
    }
}

/// Place `words` in the order given. `measure` returns the pixel size of a
/// word drawn at a font size. Words that find no room are skipped.
pub fn layout<F>(words: &[WordFrequency], cloud: &CloudConfig, mut measure: F) -> Vec<Placement>
where
    F: FnMut(&str, f32) -> (u32, u32),
{
    let limit = cloud.max_words.map_or(words.len(), |n| n.min(words.len()));
    let words = &words[..limit];
    let counts = words.iter().map(|w| w.count);
    let (Some(min_count), Some(max_count)) = (counts.clone().min(), counts.max()) else {
        return Vec::new();
    };

    let mut grid = Occupancy::new(cloud.width, cloud.height);
    let mut placed: Vec<Placement> = Vec::new();
    for wf in words {
        let size = font_size(wf.count, min_count, max_count, cloud);
        let (w, h) = measure(&wf.word, size);
        let (pw, ph) = (w + 2 * cloud.padding, h + 2 * cloud.padding);
        let Some((x, y)) = find_spot(&grid, cloud, pw, ph) else {
            tracing::debug!(word = %wf.word, size, "no room left, word skipped");
            continue;
        };
        grid.fill(x, y, pw, ph);
        placed.push(Placement {
            word: wf.word.clone(),
            count: wf.count,
            x: (x + cloud.padding) as i32,
            y: (y + cloud.padding) as i32,
            width: w,
            height: h,
            font_size: size,
            color: placed.len(),
        });
    }
    placed
}

/// First entry of [`SYSTEM_FONTS`] that exists on this machine.
pub fn system_font() -> Option<PathBuf> {
    SYSTEM_FONTS.iter().map(PathBuf::from).find(|p| p.is_file())
}

/// The configured font, or a system font when none is configured.
pub fn resolve_font_path(cloud: &CloudConfig) -> Result<PathBuf> {
    match &cloud.font_path {
        Some(path) => Ok(path.clone()),
        None => system_font().ok_or(Error::NoFont),
    }
}

fn load_font(path: &Path) -> Result<FontVec> {
    let bytes = fs::read(path).map_err(|e| Error::Font {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    FontVec::try_from_vec(bytes).map_err(|e| Error::Font {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Renderer drawing with a TrueType/OpenType font from `CloudConfig::font_path`,
/// or the first of [`SYSTEM_FONTS`] found.
#[derive(Debug, Clone, Copy, Default)]
pub struct CloudRenderer;

impl Renderer for CloudRenderer {
    fn render(&self, words: &[WordFrequency], cloud: &CloudConfig, output: &Path) -> Result<()> {
        if words.is_empty() {
            return Err(Error::EmptyCloud);
        }
        let background = parse_hex_color(&cloud.background)?;
        let palette = cloud
            .palette
            .iter()
            .map(|c| parse_hex_color(c))
            .collect::<Result<Vec<_>>>()?;
        if palette.is_empty() {
            return Err(Error::Config("palette must have at least one color".into()));
        }
        let font_path = resolve_font_path(cloud)?;
        tracing::debug!("using font {}", font_path.display());
        let font = load_font(&font_path)?;

        let placements = layout(words, cloud, |word, size| {
            text_size(PxScale::from(size), &font, word)
        });
        if placements.is_empty() {
            return Err(Error::EmptyCloud);
        }

        let mut img = RgbImage::from_pixel(cloud.width, cloud.height, background);
        for p in &placements {
            let color = palette[p.color % palette.len()];
            draw_text_mut(&mut img, color, p.x, p.y, PxScale::from(p.font_size), &font, &p.word);
        }
        img.save_with_format(output, ImageFormat::Png)
            .map_err(|source| Error::Image {
                path: output.to_path_buf(),
                source,
            })?;

        tracing::info!(
            placed = placements.len(),
            skipped = words.len() - placements.len(),
            "wrote {}",
            output.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measure(word: &str, size: f32) -> (u32, u32) {
        ((word.len() as f32 * size * 0.6).ceil() as u32, size.ceil() as u32)
    }

    fn ranked(n: usize) -> Vec<WordFrequency> {
        (0..n)
            .map(|i| WordFrequency::new(format!("word{}", "x".repeat(i % 5)), (n - i) as u32))
            .collect()
    }

    fn overlaps(a: &Placement, b: &Placement) -> bool {
        let (ax1, ay1) = (a.x + a.width as i32, a.y + a.height as i32);
        let (bx1, by1) = (b.x + b.width as i32, b.y + b.height as i32);
        a.x < bx1 && b.x < ax1 && a.y < by1 && b.y < ay1
    }

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_hex_color("#4055F1").unwrap(), Rgb([0x40, 0x55, 0xF1]));
        assert_eq!(parse_hex_color("ffffff").unwrap(), Rgb([255, 255, 255]));
        assert!(parse_hex_color("#12345").is_err());
        assert!(parse_hex_color("#GGGGGG").is_err());
    }

    #[test]
    fn font_size_is_linear() {
        let cloud = CloudConfig::default();
        assert_eq!(font_size(1, 1, 11, &cloud), 10.0);
        assert_eq!(font_size(11, 1, 11, &cloud), 40.0);
        assert_eq!(font_size(6, 1, 11, &cloud), 25.0);
        assert_eq!(font_size(3, 3, 3, &cloud), 40.0);
    }

    #[test]
    fn first_word_is_centred() {
        let cloud = CloudConfig::default();
        let words = vec![WordFrequency::new("java", 5)];
        let placed = layout(&words, &cloud, measure);
        assert_eq!(placed.len(), 1);
        let p = &placed[0];
        let mid_x = p.x + p.width as i32 / 2;
        let mid_y = p.y + p.height as i32 / 2;
        assert!((mid_x - 400).abs() <= 1, "{p:?}");
        assert!((mid_y - 300).abs() <= 1, "{p:?}");
        assert_eq!(p.font_size, 40.0);
    }

    #[test]
    fn placements_stay_inside_and_apart() {
        let cloud = CloudConfig::default();
        let placed = layout(&ranked(60), &cloud, measure);
        assert!(placed.len() > 10);
        let r2 = (cloud.radius as i32).pow(2);
        for (i, a) in placed.iter().enumerate() {
            for (x, y) in [(a.x, a.y), (a.x + a.width as i32, a.y + a.height as i32)] {
                assert!((x - 400).pow(2) + (y - 300).pow(2) <= r2, "{a:?}");
            }
            for b in &placed[i + 1..] {
                assert!(!overlaps(a, b), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn max_words_caps_layout() {
        let cloud = CloudConfig {
            max_words: Some(3),
            ..CloudConfig::default()
        };
        let placed = layout(&ranked(20), &cloud, measure);
        assert_eq!(placed.len(), 3);
        assert_eq!(placed.iter().map(|p| p.color).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn oversized_word_is_skipped() {
        let cloud = CloudConfig::default();
        let words = vec![WordFrequency::new("huge", 2), WordFrequency::new("ok", 1)];
        let placed = layout(&words, &cloud, |w, s| {
            if w == "huge" {
                (2000, 200)
            } else {
                measure(w, s)
            }
        });
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].word, "ok");
    }

    #[test]
    fn empty_words_fail_before_font_load() {
        let dir = tempfile::tempdir().unwrap();
        let err = CloudRenderer
            .render(&[], &CloudConfig::default(), &dir.path().join("out.png"))
            .unwrap_err();
        assert!(matches!(err, Error::EmptyCloud));
    }

    #[test]
    fn missing_font_is_font_error() {
        let dir = tempfile::tempdir().unwrap();
        let cloud = CloudConfig {
            font_path: Some(dir.path().join("missing.ttf")),
            ..CloudConfig::default()
        };
        let err = CloudRenderer
            .render(&[WordFrequency::new("java", 1)], &cloud, &dir.path().join("out.png"))
            .unwrap_err();
        assert!(matches!(err, Error::Font { .. }));
    }

    #[test]
    fn oversized_radius_is_bounded_by_canvas() {
        let cloud = CloudConfig {
            radius: u32::MAX,
            ..CloudConfig::default()
        };
        let words = vec![WordFrequency::new("huge", 2), WordFrequency::new("ok", 1)];
        let placed = layout(&words, &cloud, |w, s| {
            if w == "huge" {
                (2000, 200)
            } else {
                measure(w, s)
            }
        });
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].word, "ok");
    }

    #[test]
    fn configured_font_path_wins() {
        let cloud = CloudConfig {
            font_path: Some(PathBuf::from("/opt/fonts/Custom.ttf")),
            ..CloudConfig::default()
        };
        assert_eq!(resolve_font_path(&cloud).unwrap(), PathBuf::from("/opt/fonts/Custom.ttf"));
    }

    #[test]
    fn unset_font_path_uses_system_font() {
        let cloud = CloudConfig::default();
        match system_font() {
            Some(found) => assert_eq!(resolve_font_path(&cloud).unwrap(), found),
            None => assert!(matches!(resolve_font_path(&cloud), Err(Error::NoFont))),
        }
    }

    #[test]
    fn renders_png_with_system_font() {
        let Some(font) = system_font() else {
            eprintln!("skipping renders_png_with_system_font: none of {SYSTEM_FONTS:?} exists");
            return;
        };
        let cloud = CloudConfig {
            font_path: Some(font),
            ..CloudConfig::default()
        };
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("cloud.png");
        let words = vec![
            WordFrequency::new("java", 9),
            WordFrequency::new("language", 4),
            WordFrequency::new("class", 1),
        ];
        CloudRenderer.render(&words, &cloud, &out).unwrap();
        let img = image::open(&out).unwrap();
        assert_eq!(image::GenericImageView::dimensions(&img), (800, 600));
    }
}
