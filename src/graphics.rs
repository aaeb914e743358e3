use assets_manager::{
    loader::{ImageLoader, LoadFrom},
    Asset,
};
use image::DynamicImage;

use crate::{math::blend_channel, HEIGHT, WIDTH};

pub type Rgba = [u8; 4];

pub const BLACK: Rgba = [0, 0, 0, 255];
pub const WHITE: Rgba = [255, 255, 255, 255];
pub const GREY: Rgba = [110, 110, 110, 255];

const GLYPH_WIDTH: i32 = 3;
const GLYPH_HEIGHT: i32 = 5;

pub fn clear(frame: &mut [u8], color: Rgba) {
    for pixel in frame.chunks_exact_mut(4) {
        pixel.copy_from_slice(&color);
    }
}

/// Writes one pixel, blending by the alpha channel of `color`. Out of bounds is ignored.
pub fn put_pixel(frame: &mut [u8], x: i32, y: i32, color: Rgba) {
    if x < 0 || y < 0 || x >= WIDTH as i32 || y >= HEIGHT as i32 {
        return;
    }

    let i = (x as usize + y as usize * WIDTH) * 4;
    let Some(dst) = frame.get_mut(i..i + 4) else {
        return;
    };

    let alpha = color[3] as f32 / 255.;
    for (channel, src) in dst.iter_mut().zip(color).take(3) {
        *channel = blend_channel(*channel, src, alpha);
    }
    dst[3] = 255;
}

pub fn fill_rect(frame: &mut [u8], x: i32, y: i32, width: i32, height: i32, color: Rgba) {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + width).min(WIDTH as i32);
    let y1 = (y + height).min(HEIGHT as i32);

    for py in y0..y1 {
        for px in x0..x1 {
            put_pixel(frame, px, py, color);
        }
    }
}

/// Pulls the whole frame towards `color`, used for fades and overlays.
pub fn shade(frame: &mut [u8], color: Rgba, alpha: f32) {
    if alpha <= 0. {
        return;
    }
    for pixel in frame.chunks_exact_mut(4) {
        for (channel, src) in pixel.iter_mut().zip(color).take(3) {
            *channel = blend_channel(*channel, src, alpha);
        }
    }
}

pub fn with_alpha(color: Rgba, alpha: f32) -> Rgba {
    let [r, g, b, a] = color;
    [r, g, b, (a as f32 * alpha.clamp(0., 1.)) as u8]
}

pub fn text_width(text: &str, scale: i32) -> i32 {
    let len = text.chars().count() as i32;
    if len == 0 {
        return 0;
    }
    (len * (GLYPH_WIDTH + 1) - 1) * scale
}

pub fn draw_text(frame: &mut [u8], x: i32, y: i32, scale: i32, text: &str, color: Rgba) {
    let mut cursor = x;
    for c in text.chars() {
        if let Some(rows) = glyph(c) {
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (0b100 >> col) == 0 {
                        continue;
                    }
                    fill_rect(
                        frame,
                        cursor + col * scale,
                        y + row as i32 * scale,
                        scale,
                        scale,
                        color,
                    );
                }
            }
        }
        cursor += (GLYPH_WIDTH + 1) * scale;
    }
}

/// Draws `text` horizontally centred on the frame.
pub fn draw_text_centered(frame: &mut [u8], y: i32, scale: i32, text: &str, color: Rgba) {
    let x = (WIDTH as i32 - text_width(text, scale)) / 2;
    draw_text(frame, x, y, scale, text, color);
}

pub fn text_height(scale: i32) -> i32 {
    GLYPH_HEIGHT * scale
}

#[rustfmt::skip]
fn glyph(c: char) -> Option<[u8; 5]> {
    let rows = match c.to_ascii_uppercase() {
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => [0b011, 0b100, 0b101, 0b101, 0b011],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b001, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b110, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b010, 0b101, 0b101, 0b101, 0b010],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'Q' => [0b010, 0b101, 0b101, 0b110, 0b011],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b110, 0b001, 0b010, 0b100, 0b111],
        '3' => [0b110, 0b001, 0b010, 0b001, 0b110],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b110, 0b001, 0b110],
        '6' => [0b011, 0b100, 0b110, 0b101, 0b010],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b010, 0b101, 0b010, 0b101, 0b010],
        '9' => [0b010, 0b101, 0b011, 0b001, 0b110],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        _ => return None,
    };
    Some(rows)
}

/// Copies a texture onto the frame with its top left corner at `(x, y)`,
/// skipping fully transparent pixels.
pub fn draw_sprite(frame: &mut [u8], x: i32, y: i32, tex: &Texture) {
    let width = tex.width() as usize;
    for (i, texel) in tex.pixels().chunks_exact(4).enumerate() {
        if texel[3] == 0 {
            continue;
        }
        let tx = (i % width) as i32;
        let ty = (i / width) as i32;
        put_pixel(frame, x + tx, y + ty, [texel[0], texel[1], texel[2], texel[3]]);
    }
}

pub struct Texture {
    image: DynamicImage,
}

impl From<DynamicImage> for Texture {
    fn from(value: DynamicImage) -> Self {
        // pixels() hands out raw bytes, keep them 4 per texel
        Texture {
            image: DynamicImage::ImageRgba8(value.into_rgba8()),
        }
    }
}

impl Asset for Texture {
    const EXTENSIONS: &'static [&'static str] = &["png", "jpg"];
    type Loader = LoadFrom<DynamicImage, ImageLoader>;
}

impl Texture {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixels(&self) -> &[u8] {
        self.image.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Vec<u8> {
        vec![0; WIDTH * HEIGHT * 4]
    }

    fn pixel(frame: &[u8], x: usize, y: usize) -> &[u8] {
        let i = (x + y * WIDTH) * 4;
        &frame[i..i + 4]
    }

    #[test]
    fn rects_are_clipped_to_the_frame() {
        let mut frame = frame();
        fill_rect(&mut frame, -5, -5, 10, 10, WHITE);
        fill_rect(&mut frame, WIDTH as i32 - 2, HEIGHT as i32 - 2, 10, 10, WHITE);

        assert_eq!(pixel(&frame, 0, 0), &WHITE);
        assert_eq!(pixel(&frame, 4, 4), &WHITE);
        assert_eq!(pixel(&frame, 5, 5), &[0, 0, 0, 0]);
        assert_eq!(pixel(&frame, WIDTH - 1, HEIGHT - 1), &WHITE);
    }

    #[test]
    fn short_frames_are_not_overrun() {
        let mut frame = vec![0; 16];
        fill_rect(&mut frame, 0, 0, WIDTH as i32, HEIGHT as i32, WHITE);
        assert_eq!(&frame[..4], &WHITE);
    }

    #[test]
    fn translucent_rect_blends() {
        let mut frame = frame();
        clear(&mut frame, BLACK);
        fill_rect(&mut frame, 0, 0, 1, 1, with_alpha(WHITE, 0.5));

        let p = pixel(&frame, 0, 0);
        assert!(p[0] > 120 && p[0] < 135);
        assert_eq!(p[3], 255);
    }

    #[test]
    fn shade_darkens_everything() {
        let mut frame = frame();
        clear(&mut frame, WHITE);
        shade(&mut frame, BLACK, 1.);
        assert!(frame.chunks_exact(4).all(|p| p[..3] == [0, 0, 0]));
    }

    #[test]
    fn text_lights_glyph_pixels() {
        let mut frame = frame();
        draw_text(&mut frame, 0, 0, 1, "1", WHITE);

        // '1' is 010 / 110 / 010 / 010 / 111
        assert_eq!(pixel(&frame, 1, 0), &WHITE);
        assert_eq!(pixel(&frame, 0, 0), &[0, 0, 0, 0]);
        assert_eq!(pixel(&frame, 0, 4), &WHITE);
        assert_eq!(text_width("11", 2), 14);
        assert_eq!(text_width("", 2), 0);
    }
}
