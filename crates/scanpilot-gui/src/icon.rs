//! ScanPilot application icon generator.
//!
//! Produces a procedural icon: a radar dial with concentric range rings,
//! a sweeping beam, and a bright contact blip (the "pilot watching the
//! scan" motif). Rendered at an arbitrary resolution as RGBA pixel data
//! suitable for use as a window icon or for ICO file generation.

/// Generate a ScanPilot icon as egui `IconData`.
pub fn generate_icon(size: u32) -> egui::IconData {
    let rgba = render_icon(size);
    egui::IconData {
        rgba,
        width: size,
        height: size,
    }
}

/// Render the icon into an RGBA pixel buffer (top-to-bottom row order).
pub fn render_icon(size: u32) -> Vec<u8> {
    let s = size as f32;
    let mut pixels = vec![0u8; (size * size * 4) as usize];

    let cx = s * 0.5;
    let cy = s * 0.5;
    let dial_radius = s * 0.46;

    // Range rings as fractions of the dial radius.
    let rings = [0.33f32, 0.62, 0.90];
    let ring_half_width = (s * 0.012).max(0.5);

    // The beam sweeps 70° and trails off behind its leading edge.
    let beam_lead_deg = 40.0f32;
    let beam_span_deg = 70.0f32;

    // The contact blip sits inside the beam, two rings out.
    let blip_angle = (beam_lead_deg - 12.0).to_radians();
    let blip_x = cx + dial_radius * 0.62 * blip_angle.cos();
    let blip_y = cy - dial_radius * 0.62 * blip_angle.sin();
    let blip_radius = s * 0.05;

    for y in 0..size {
        for x in 0..size {
            let px = x as f32 + 0.5;
            let py = y as f32 + 0.5;
            let dx = px - cx;
            let dy = py - cy;
            let dist = (dx * dx + dy * dy).sqrt();

            let mut cr = 0u8;
            let mut cg = 0u8;
            let mut cb = 0u8;
            let mut ca = 0.0f32;

            // 1. Dial disc (dark navy, slightly lighter toward centre).
            if dist < dial_radius + 1.5 {
                let aa = coverage(dist, dial_radius);
                let depth = 1.0 - 0.25 * (dist / dial_radius);
                cr = (0x1e as f32 * depth) as u8;
                cg = (0x24 as f32 * depth) as u8;
                cb = (0x38 as f32 * depth) as u8;
                ca = aa;

                // Screen-space angle, counter-clockwise from +X.
                let angle_deg = (-dy).atan2(dx).to_degrees().rem_euclid(360.0);

                // 2. Sweeping beam with a trailing fade.
                let behind = (beam_lead_deg - angle_deg).rem_euclid(360.0);
                if behind < beam_span_deg {
                    let fade = 1.0 - behind / beam_span_deg;
                    let glow = fade * fade * 0.85;
                    cr = blend(cr, 0x57, glow);
                    cg = blend(cg, 0xd6, glow);
                    cb = blend(cb, 0x8f, glow);
                }

                // 3. Range rings.
                for ring in rings {
                    let ring_r = dial_radius * ring;
                    let band = (dist - ring_r).abs();
                    if band < ring_half_width + 1.0 {
                        let ring_aa = coverage(band, ring_half_width);
                        cr = blend(cr, 0x6d, ring_aa * 0.55);
                        cg = blend(cg, 0x83, ring_aa * 0.55);
                        cb = blend(cb, 0xa4, ring_aa * 0.55);
                    }
                }
            }

            // 4. Bezel ring around the dial.
            let bezel_half = (s * 0.022).max(0.75);
            let bezel_band = (dist - dial_radius).abs();
            if bezel_band < bezel_half + 1.5 {
                let bezel_aa = coverage(bezel_band, bezel_half);
                cr = blend(cr, 0x89, bezel_aa);
                cg = blend(cg, 0xb4, bezel_aa);
                cb = blend(cb, 0xfa, bezel_aa);
                ca = ca + (1.0 - ca) * bezel_aa;
            }

            // 5. Contact blip with a soft halo.
            let bdx = px - blip_x;
            let bdy = py - blip_y;
            let bdist = (bdx * bdx + bdy * bdy).sqrt();
            if bdist < blip_radius * 2.5 {
                let core = coverage(bdist, blip_radius);
                let halo = (1.0 - bdist / (blip_radius * 2.5)).max(0.0) * 0.35;
                let strength = (core + halo).min(1.0);
                cr = blend(cr, 0xa6, strength);
                cg = blend(cg, 0xe3, strength);
                cb = blend(cb, 0xa1, strength);
                ca = ca + (1.0 - ca) * strength;
            }

            let idx = ((y * size + x) * 4) as usize;
            pixels[idx] = cr;
            pixels[idx + 1] = cg;
            pixels[idx + 2] = cb;
            pixels[idx + 3] = (ca * 255.0).clamp(0.0, 255.0) as u8;
        }
    }

    pixels
}

/// Anti-aliased coverage of a point at `dist` from an edge at `edge`:
/// 1 well inside, 0 well outside, linear over the 2-pixel transition.
fn coverage(dist: f32, edge: f32) -> f32 {
    let d = dist - edge;
    if d < -1.0 {
        1.0
    } else if d > 1.0 {
        0.0
    } else {
        0.5 - d * 0.5
    }
}

/// Blend channel `a` toward `b` by factor `t`.
fn blend(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 * (1.0 - t) + b as f32 * t).clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_has_rgba_layout() {
        let px = render_icon(32);
        assert_eq!(px.len(), 32 * 32 * 4);
    }

    #[test]
    fn corners_are_transparent_centre_is_not() {
        let size = 64u32;
        let px = render_icon(size);
        // Top-left corner alpha.
        assert_eq!(px[3], 0);
        // Centre pixel alpha.
        let centre = (((size / 2) * size + size / 2) * 4 + 3) as usize;
        assert!(px[centre] > 200);
    }
}
