/// Filter implementations
///
/// Pure CPU pixel operations over RGBA buffers. Every function here is
/// deterministic: the same input image and parameters always produce
/// bit-identical output, so the preview can be recomputed from scratch on
/// any change. Degenerate parameters (radius 0, scale 0) pass the image
/// through unchanged rather than failing. Alpha is preserved throughout.
use image::{imageops, Rgba, RgbaImage};

/// Sepia tone: classic sepia matrix blended with the original by intensity.
pub fn sepia(image: &RgbaImage, intensity: f32) -> RgbaImage {
    let intensity = intensity.clamp(0.0, 1.0);
    let mut out = image.clone();

    for pixel in out.pixels_mut() {
        let r = pixel[0] as f32;
        let g = pixel[1] as f32;
        let b = pixel[2] as f32;

        // Sepia tone transformation
        let tr = (0.393 * r + 0.769 * g + 0.189 * b).min(255.0);
        let tg = (0.349 * r + 0.686 * g + 0.168 * b).min(255.0);
        let tb = (0.272 * r + 0.534 * g + 0.131 * b).min(255.0);

        // Blend with original based on intensity
        pixel[0] = (r * (1.0 - intensity) + tr * intensity) as u8;
        pixel[1] = (g * (1.0 - intensity) + tg * intensity) as u8;
        pixel[2] = (b * (1.0 - intensity) + tb * intensity) as u8;
    }

    out
}

/// Edges: Sobel gradient magnitude, scaled by intensity.
///
/// Output is grayscale edge strength; the one-pixel border has no full
/// neighborhood and stays black.
pub fn edges(image: &RgbaImage, intensity: f32) -> RgbaImage {
    let intensity = intensity.clamp(0.0, 1.0);
    let width = image.width();
    let height = image.height();

    let mut out = RgbaImage::new(width, height);
    for (src, dst) in image.pixels().zip(out.pixels_mut()) {
        *dst = Rgba([0, 0, 0, src[3]]);
    }

    // Sobel operators
    let sobel_x: [i32; 9] = [-1, 0, 1, -2, 0, 2, -1, 0, 1];
    let sobel_y: [i32; 9] = [-1, -2, -1, 0, 0, 0, 1, 2, 1];

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let mut gx = 0i32;
            let mut gy = 0i32;

            for ky in -1i32..=1 {
                for kx in -1i32..=1 {
                    let px = (x as i32 + kx) as u32;
                    let py = (y as i32 + ky) as u32;
                    let pixel = image.get_pixel(px, py);
                    let gray = (pixel[0] as i32 + pixel[1] as i32 + pixel[2] as i32) / 3;

                    let ki = ((ky + 1) * 3 + (kx + 1)) as usize;
                    gx += gray * sobel_x[ki];
                    gy += gray * sobel_y[ki];
                }
            }

            let magnitude = ((gx * gx + gy * gy) as f32).sqrt() * intensity;
            let value = magnitude.clamp(0.0, 255.0) as u8;
            let pixel = out.get_pixel_mut(x, y);
            pixel[0] = value;
            pixel[1] = value;
            pixel[2] = value;
        }
    }

    out
}

/// Gaussian blur with sigma = radius.
pub fn gaussian_blur(image: &RgbaImage, radius: f32) -> RgbaImage {
    if radius <= 0.0 {
        return image.clone();
    }
    imageops::blur(image, radius)
}

/// Pixellate: block-average mosaic with blocks of `scale` pixels.
pub fn pixellate(image: &RgbaImage, scale: f32) -> RgbaImage {
    let block_size = scale.round() as u32;
    if block_size <= 1 {
        return image.clone();
    }

    let width = image.width();
    let height = image.height();
    let mut out = image.clone();

    for y in (0..height).step_by(block_size as usize) {
        for x in (0..width).step_by(block_size as usize) {
            // Average color of the block
            let mut r_sum = 0u32;
            let mut g_sum = 0u32;
            let mut b_sum = 0u32;
            let mut count = 0u32;

            let y_end = (y + block_size).min(height);
            let x_end = (x + block_size).min(width);

            for by in y..y_end {
                for bx in x..x_end {
                    let pixel = image.get_pixel(bx, by);
                    r_sum += pixel[0] as u32;
                    g_sum += pixel[1] as u32;
                    b_sum += pixel[2] as u32;
                    count += 1;
                }
            }

            let count = count.max(1);
            let avg_r = (r_sum / count) as u8;
            let avg_g = (g_sum / count) as u8;
            let avg_b = (b_sum / count) as u8;

            // Fill the block with the average color
            for by in y..y_end {
                for bx in x..x_end {
                    let pixel = out.get_pixel_mut(bx, by);
                    pixel[0] = avg_r;
                    pixel[1] = avg_g;
                    pixel[2] = avg_b;
                }
            }
        }
    }

    out
}

/// Crystallize: jittered-grid Voronoi cells of roughly `radius` pixels.
///
/// Each grid cell gets one seed point, displaced by a hash of its cell
/// coordinates; every pixel takes the color of its nearest seed. The hash
/// keeps the jitter deterministic, so repeated runs are bit-identical.
pub fn crystallize(image: &RgbaImage, radius: f32) -> RgbaImage {
    let cell = radius.round() as u32;
    if cell <= 1 {
        return image.clone();
    }

    let width = image.width();
    let height = image.height();
    let mut out = image.clone();

    // Seed position for a grid cell: the cell corner plus hashed jitter.
    let seed_at = |cx: i64, cy: i64| -> (i64, i64) {
        let jx = (cell_hash(cx, cy, 0x9e37) % cell as u64) as i64;
        let jy = (cell_hash(cx, cy, 0x79b9) % cell as u64) as i64;
        (cx * cell as i64 + jx, cy * cell as i64 + jy)
    };

    for y in 0..height {
        for x in 0..width {
            let cx = (x / cell) as i64;
            let cy = (y / cell) as i64;

            // Nearest seed among the 3x3 neighborhood of grid cells
            let mut best_dist = i64::MAX;
            let mut best = (x as i64, y as i64);
            for ny in (cy - 1)..=(cy + 1) {
                for nx in (cx - 1)..=(cx + 1) {
                    let (sx, sy) = seed_at(nx, ny);
                    let dx = sx - x as i64;
                    let dy = sy - y as i64;
                    let dist = dx * dx + dy * dy;
                    if dist < best_dist {
                        best_dist = dist;
                        best = (sx, sy);
                    }
                }
            }

            let sx = best.0.clamp(0, width as i64 - 1) as u32;
            let sy = best.1.clamp(0, height as i64 - 1) as u32;
            let seed_pixel = *image.get_pixel(sx, sy);
            let pixel = out.get_pixel_mut(x, y);
            pixel[0] = seed_pixel[0];
            pixel[1] = seed_pixel[1];
            pixel[2] = seed_pixel[2];
        }
    }

    out
}

/// Integer mixing hash for the crystallize jitter. Not cryptographic, just
/// well-spread and stable across runs.
fn cell_hash(x: i64, y: i64, salt: u64) -> u64 {
    let mut h = (x as u64).wrapping_mul(0x9e3779b97f4a7c15)
        ^ (y as u64).wrapping_mul(0xc2b2ae3d27d4eb4f)
        ^ salt;
    h ^= h >> 33;
    h = h.wrapping_mul(0xff51afd7ed558ccd);
    h ^= h >> 33;
    h
}

/// Unsharp mask: source + (source - blurred) * intensity.
pub fn unsharp_mask(image: &RgbaImage, radius: f32, intensity: f32) -> RgbaImage {
    let intensity = intensity.clamp(0.0, 1.0);
    if radius <= 0.0 || intensity <= 0.0 {
        return image.clone();
    }

    let blurred = imageops::blur(image, radius);
    let mut out = image.clone();

    for ((orig, blur), dst) in image
        .pixels()
        .zip(blurred.pixels())
        .zip(out.pixels_mut())
    {
        for c in 0..3 {
            let high_pass = orig[c] as f32 - blur[c] as f32;
            dst[c] = (orig[c] as f32 + high_pass * intensity).clamp(0.0, 255.0) as u8;
        }
    }

    out
}

/// Vignette: radial darkening toward the corners.
///
/// `radius` (0-100) sets where the falloff starts as a fraction of the
/// half-diagonal; `intensity` sets how dark the corners get.
pub fn vignette(image: &RgbaImage, intensity: f32, radius: f32) -> RgbaImage {
    let intensity = intensity.clamp(0.0, 1.0);
    let width = image.width();
    let height = image.height();
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let max_distance = (center_x * center_x + center_y * center_y).sqrt().max(1.0);
    let start = (radius / 100.0).clamp(0.0, 0.95);

    let mut out = image.clone();
    for (y, row) in out.rows_mut().enumerate() {
        for (x, pixel) in row.enumerate() {
            let dx = x as f32 - center_x;
            let dy = y as f32 - center_y;
            let distance = (dx * dx + dy * dy).sqrt();

            let normalized = distance / max_distance;
            let t = ((normalized - start) / (1.0 - start)).clamp(0.0, 1.0);
            let factor = 1.0 - intensity * t * t;

            pixel[0] = (pixel[0] as f32 * factor) as u8;
            pixel[1] = (pixel[1] as f32 * factor) as u8;
            pixel[2] = (pixel[2] as f32 * factor) as u8;
        }
    }

    out
}

/// Motion blur: horizontal directional average over `radius` pixels.
///
/// Taps outside the frame clamp to the edge, the same convention the other
/// kernels use.
pub fn motion_blur(image: &RgbaImage, radius: f32) -> RgbaImage {
    let steps = radius.ceil() as i32;
    if steps <= 0 {
        return image.clone();
    }

    let width = image.width();
    let height = image.height();
    let mut out = image.clone();
    let step_weight = 1.0 / (steps as f32 + 1.0);

    for y in 0..height {
        for x in 0..width {
            let mut sum = [0.0f32; 3];

            // Symmetric taps centered on the pixel
            for i in 0..=steps {
                let t = i as f32 - steps as f32 / 2.0;
                let sx = ((x as f32 + t).round() as i64).clamp(0, width as i64 - 1) as u32;
                let pixel = image.get_pixel(sx, y);
                for c in 0..3 {
                    sum[c] += pixel[c] as f32 * step_weight;
                }
            }

            let pixel = out.get_pixel_mut(x, y);
            for c in 0..3 {
                pixel[c] = sum[c].clamp(0.0, 255.0) as u8;
            }
        }
    }

    out
}

/// Vibrance: saturation boost weighted toward less-saturated pixels, so
/// already-vivid colors are mostly left alone.
pub fn vibrance(image: &RgbaImage, intensity: f32) -> RgbaImage {
    let intensity = intensity.clamp(0.0, 1.0);
    if intensity == 0.0 {
        return image.clone();
    }
    let mut out = image.clone();

    for pixel in out.pixels_mut() {
        let r = pixel[0] as f32;
        let g = pixel[1] as f32;
        let b = pixel[2] as f32;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let saturation = (max - min) / 255.0;

        // Less-saturated pixels get the bigger boost
        let boost = 1.0 + intensity * (1.0 - saturation);
        let avg = (r + g + b) / 3.0;

        pixel[0] = (avg + (r - avg) * boost).clamp(0.0, 255.0) as u8;
        pixel[1] = (avg + (g - avg) * boost).clamp(0.0, 255.0) as u8;
        pixel[2] = (avg + (b - avg) * boost).clamp(0.0, 255.0) as u8;
    }

    out
}

/// Luma threshold above which a pixel feeds the bloom highlight pass.
const BLOOM_THRESHOLD: f32 = 180.0;

/// Bloom: blurred highlights added back over the source.
pub fn bloom(image: &RgbaImage, intensity: f32, radius: f32) -> RgbaImage {
    let intensity = intensity.clamp(0.0, 1.0);
    if radius <= 0.0 || intensity <= 0.0 {
        return image.clone();
    }

    // Bright pass: keep highlight pixels, zero the rest
    let mut highlights = image.clone();
    for pixel in highlights.pixels_mut() {
        let luma = 0.2126 * pixel[0] as f32 + 0.7152 * pixel[1] as f32 + 0.0722 * pixel[2] as f32;
        if luma < BLOOM_THRESHOLD {
            pixel[0] = 0;
            pixel[1] = 0;
            pixel[2] = 0;
        }
    }

    let glow = imageops::blur(&highlights, radius);
    let mut out = image.clone();

    for (glow_pixel, dst) in glow.pixels().zip(out.pixels_mut()) {
        for c in 0..3 {
            let value = dst[c] as f32 + glow_pixel[c] as f32 * intensity;
            dst[c] = value.clamp(0.0, 255.0) as u8;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A small gradient image with varied colors for kernel tests.
    fn test_image() -> RgbaImage {
        RgbaImage::from_fn(16, 16, |x, y| {
            Rgba([(x * 16) as u8, (y * 16) as u8, ((x + y) * 8) as u8, 255])
        })
    }

    #[test]
    fn test_zero_radius_is_identity() {
        let img = test_image();
        assert_eq!(gaussian_blur(&img, 0.0), img);
        assert_eq!(crystallize(&img, 0.0), img);
        assert_eq!(motion_blur(&img, 0.0), img);
        assert_eq!(unsharp_mask(&img, 0.0, 0.5), img);
        assert_eq!(bloom(&img, 0.5, 0.0), img);
    }

    #[test]
    fn test_zero_scale_is_identity() {
        let img = test_image();
        assert_eq!(pixellate(&img, 0.0), img);
    }

    #[test]
    fn test_sepia_zero_intensity_is_identity() {
        let img = test_image();
        assert_eq!(sepia(&img, 0.0), img);
    }

    #[test]
    fn test_sepia_full_intensity_changes_pixels() {
        let img = test_image();
        let out = sepia(&img, 1.0);
        assert_ne!(out, img);
        // Alpha must survive
        assert!(out.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn test_vibrance_zero_intensity_is_identity() {
        let img = test_image();
        assert_eq!(vibrance(&img, 0.0), img);
    }

    #[test]
    fn test_pixellate_fills_uniform_blocks() {
        let img = test_image();
        let out = pixellate(&img, 8.0);
        // Every pixel in the top-left 8x8 block shares one color
        let first = out.get_pixel(0, 0);
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(out.get_pixel(x, y), first);
            }
        }
    }

    #[test]
    fn test_crystallize_is_deterministic() {
        let img = test_image();
        let a = crystallize(&img, 5.0);
        let b = crystallize(&img, 5.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_edges_border_is_black() {
        let img = test_image();
        let out = edges(&img, 1.0);
        let corner = out.get_pixel(0, 0);
        assert_eq!((corner[0], corner[1], corner[2]), (0, 0, 0));
    }

    #[test]
    fn test_vignette_darkens_corners_not_center() {
        let img = RgbaImage::from_pixel(32, 32, Rgba([200, 200, 200, 255]));
        let out = vignette(&img, 1.0, 10.0);
        let center = out.get_pixel(16, 16);
        let corner = out.get_pixel(0, 0);
        assert!(corner[0] < center[0]);
    }

    #[test]
    fn test_tiny_images_do_not_panic() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([10, 20, 30, 255]));
        let _ = sepia(&img, 0.5);
        let _ = edges(&img, 0.5);
        let _ = pixellate(&img, 10.0);
        let _ = crystallize(&img, 10.0);
        let _ = motion_blur(&img, 10.0);
        let _ = vignette(&img, 0.5, 10.0);
    }
}
