//! Synthetic eye images shared by the integration tests.

#![allow(dead_code)]

/// Frame with a filled dark disc on a uniform background.
pub fn disc_frame(
    width: usize,
    height: usize,
    cx: f32,
    cy: f32,
    radius: f32,
    pupil: u8,
    background: u8,
) -> Vec<u8> {
    let mut data = vec![background; width * height];
    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            if dx * dx + dy * dy <= radius * radius {
                data[y * width + x] = pupil;
            }
        }
    }
    data
}

/// Binary edge map marking disc pixels with a 4-neighbour outside the disc.
pub fn disc_edges(width: usize, height: usize, cx: f32, cy: f32, radius: f32) -> Vec<u8> {
    let inside = |x: i64, y: i64| {
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        dx * dx + dy * dy <= radius * radius
    };
    let mut edges = vec![0u8; width * height];
    for y in 0..height as i64 {
        for x in 0..width as i64 {
            if !inside(x, y) {
                continue;
            }
            let border = !inside(x - 1, y)
                || !inside(x + 1, y)
                || !inside(x, y - 1)
                || !inside(x, y + 1);
            if border {
                edges[y as usize * width + x as usize] = 255;
            }
        }
    }
    edges
}
