//! Cover art rasterization into terminal text.
//!
//! Embedded pictures are decoded with `image`, scaled to a fixed cell grid
//! and mapped onto a luminance ramp. Songs without a picture get a
//! generated pattern so the info panel never has a hole in it.

use image::imageops::FilterType;

pub const ART_WIDTH: u32 = 32;
pub const ART_HEIGHT: u32 = 16;

const RAMP: &[u8] = b" .:-=+*#%@";

/// Rendered art, one `String` per terminal row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverArt {
    pub width: u32,
    pub height: u32,
    pub lines: Vec<String>,
}

impl CoverArt {
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Decode `bytes` (JPEG/PNG) and rasterize it. `None` when the picture
/// cannot be decoded.
pub fn render_cover(bytes: &[u8], width: u32, height: u32) -> Option<CoverArt> {
    if bytes.is_empty() || width == 0 || height == 0 {
        return None;
    }

    let img = match image::load_from_memory(bytes) {
        Ok(img) => img,
        Err(e) => {
            tracing::debug!("cover art decode failed: {e}");
            return None;
        }
    };

    let gray = img
        .resize_exact(width, height, FilterType::Triangle)
        .to_luma8();

    let last = RAMP.len() - 1;
    let lines = (0..height)
        .map(|y| {
            (0..width)
                .map(|x| {
                    let luma = gray.get_pixel(x, y).0[0] as usize;
                    RAMP[(luma * last / 255).min(last)] as char
                })
                .collect()
        })
        .collect();

    Some(CoverArt {
        width,
        height,
        lines,
    })
}

/// Generated stand-in art, stable for a given title and artist.
pub fn placeholder_art(title: &str, artist: &str, width: u32, height: u32) -> CoverArt {
    let seed = pattern_seed(&format!("{title}{artist}"));
    let (w, h) = (width as i64, height as i64);

    let lines = (0..h)
        .map(|y| {
            (0..w)
                .map(|x| match seed % 4 {
                    0 if (x + y) % 3 == 0 => '/',
                    0 if (x - y).rem_euclid(3) == 0 => '\\',
                    1 if x > 0 && y > 0 && (x * y) % 5 == 0 => '•',
                    2 if x % 4 == y % 4 => '~',
                    3 if x == w / 2 || y == h / 2 => '+',
                    _ => ' ',
                })
                .collect()
        })
        .collect();

    CoverArt {
        width,
        height,
        lines,
    }
}

fn pattern_seed(s: &str) -> u64 {
    s.chars()
        .enumerate()
        .fold(0u64, |acc, (i, c)| {
            acc.wrapping_add((c as u64).wrapping_mul(i as u64 + 1))
        })
}
