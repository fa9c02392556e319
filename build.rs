//! Build script -- generates the application icon and embeds Windows
//! application manifest and icon resource.

fn main() {
    // Generate icon if it does not already exist.
    let icon_path = "assets/icon.ico";
    if !std::path::Path::new(icon_path).exists() {
        std::fs::create_dir_all("assets").ok();
        match generate_ico(&[48, 32, 16]) {
            Ok(data) => {
                if let Err(e) = std::fs::write(icon_path, &data) {
                    eprintln!("cargo:warning=Failed to write icon: {e}");
                }
            }
            Err(e) => eprintln!("cargo:warning=Failed to generate icon: {e}"),
        }
    }

    // Only embed resources on Windows.
    if std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default() == "windows" {
        let mut res = winresource::WindowsResource::new();
        res.set_manifest(
            r#"
<assembly xmlns="urn:schemas-microsoft-com:asm.v1" manifestVersion="1.0">
  <trustInfo xmlns="urn:schemas-microsoft-com:asm.v3">
    <security>
      <requestedPrivileges>
        <requestedExecutionLevel level="asInvoker" uiAccess="false"/>
      </requestedPrivileges>
    </security>
  </trustInfo>
  <compatibility xmlns="urn:schemas-microsoft-com:compatibility.v1">
    <application>
      <supportedOS Id="{8e0f7a12-bfb3-4fe8-b9a5-48fd50a15a9a}"/>
    </application>
  </compatibility>
  <application xmlns="urn:schemas-microsoft-com:asm.v3">
    <windowsSettings>
      <dpiAware xmlns="http://schemas.microsoft.com/SMI/2005/WindowsSettings">true/pm</dpiAware>
      <dpiAwareness xmlns="http://schemas.microsoft.com/SMI/2016/WindowsSettings">PerMonitorV2</dpiAwareness>
    </windowsSettings>
  </application>
</assembly>
"#,
        );

        if std::path::Path::new(icon_path).exists() {
            res.set_icon(icon_path);
        }

        if let Err(e) = res.compile() {
            eprintln!("cargo:warning=Failed to compile Windows resources: {e}");
        }
    }
}

// ════════════════════════════════════════════════════════════════
// Icon rendering (self-contained — no workspace crate deps)
// ════════════════════════════════════════════════════════════════

/// Produce a multi-resolution ICO file as bytes.
fn generate_ico(sizes: &[u32]) -> Result<Vec<u8>, String> {
    let mut ico: Vec<u8> = Vec::new();

    // ICO header.
    ico.extend_from_slice(&0u16.to_le_bytes()); // reserved
    ico.extend_from_slice(&1u16.to_le_bytes()); // type = ICO
    ico.extend_from_slice(&(sizes.len() as u16).to_le_bytes());

    // Pre-render all images.
    let images: Vec<(u32, Vec<u8>)> = sizes
        .iter()
        .map(|&sz| {
            let rgba = render_icon_rgba(sz);
            let bmp = rgba_to_ico_bmp(&rgba, sz);
            (sz, bmp)
        })
        .collect();

    // Directory entries.
    let header_len = 6 + 16 * sizes.len();
    let mut offset = header_len;
    for (sz, bmp) in &images {
        let w = if *sz >= 256 { 0u8 } else { *sz as u8 };
        let h = w;
        ico.push(w);
        ico.push(h);
        ico.push(0); // colour count
        ico.push(0); // reserved
        ico.extend_from_slice(&1u16.to_le_bytes()); // planes
        ico.extend_from_slice(&32u16.to_le_bytes()); // bpp
        ico.extend_from_slice(&(bmp.len() as u32).to_le_bytes());
        ico.extend_from_slice(&(offset as u32).to_le_bytes());
        offset += bmp.len();
    }

    // Image data.
    for (_, bmp) in &images {
        ico.extend_from_slice(bmp);
    }

    Ok(ico)
}

/// Convert top-to-bottom RGBA pixels into a BMP blob for an ICO entry.
fn rgba_to_ico_bmp(rgba: &[u8], size: u32) -> Vec<u8> {
    let mut bmp: Vec<u8> = Vec::new();

    // BITMAPINFOHEADER (40 bytes).
    bmp.extend_from_slice(&40u32.to_le_bytes());
    bmp.extend_from_slice(&(size as i32).to_le_bytes());
    bmp.extend_from_slice(&((size as i32) * 2).to_le_bytes()); // doubled for ICO
    bmp.extend_from_slice(&1u16.to_le_bytes()); // planes
    bmp.extend_from_slice(&32u16.to_le_bytes()); // bpp
    bmp.extend_from_slice(&0u32.to_le_bytes()); // compression
    bmp.extend_from_slice(&0u32.to_le_bytes()); // image size
    bmp.extend_from_slice(&0i32.to_le_bytes()); // x ppm
    bmp.extend_from_slice(&0i32.to_le_bytes()); // y ppm
    bmp.extend_from_slice(&0u32.to_le_bytes()); // colours used
    bmp.extend_from_slice(&0u32.to_le_bytes()); // important colours

    // Pixel data — bottom-to-top, BGRA.
    for y in (0..size).rev() {
        for x in 0..size {
            let idx = ((y * size + x) * 4) as usize;
            let r = rgba[idx];
            let g = rgba[idx + 1];
            let b = rgba[idx + 2];
            let a = rgba[idx + 3];
            bmp.push(b);
            bmp.push(g);
            bmp.push(r);
            bmp.push(a);
        }
    }

    // AND mask (1 bpp, bottom-to-top, rows padded to 4-byte boundary).
    let row_bytes = size.div_ceil(32) * 4;
    for y in (0..size).rev() {
        let mut row = vec![0u8; row_bytes as usize];
        for x in 0..size {
            let alpha = rgba[((y * size + x) * 4 + 3) as usize];
            if alpha < 128 {
                let byte_idx = (x / 8) as usize;
                let bit_idx = 7 - (x % 8);
                row[byte_idx] |= 1 << bit_idx;
            }
        }
        bmp.extend_from_slice(&row);
    }

    bmp
}

/// Render the ScanPilot radar icon as top-to-bottom RGBA pixels.
///
/// This is a self-contained copy of the algorithm in
/// `crates/scanpilot-gui/src/icon.rs` so the build script
/// has no dependency on workspace crates.
fn render_icon_rgba(size: u32) -> Vec<u8> {
    let s = size as f32;
    let mut pixels = vec![0u8; (size * size * 4) as usize];

    let cx = s * 0.5;
    let cy = s * 0.5;
    let dial_radius = s * 0.46;

    let rings = [0.33f32, 0.62, 0.90];
    let ring_half_width = (s * 0.012).max(0.5);

    let beam_lead_deg = 40.0f32;
    let beam_span_deg = 70.0f32;

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

            if dist < dial_radius + 1.5 {
                let aa = ico_coverage(dist, dial_radius);
                let depth = 1.0 - 0.25 * (dist / dial_radius);
                cr = (0x1e as f32 * depth) as u8;
                cg = (0x24 as f32 * depth) as u8;
                cb = (0x38 as f32 * depth) as u8;
                ca = aa;

                let angle_deg = (-dy).atan2(dx).to_degrees().rem_euclid(360.0);

                let behind = (beam_lead_deg - angle_deg).rem_euclid(360.0);
                if behind < beam_span_deg {
                    let fade = 1.0 - behind / beam_span_deg;
                    let glow = fade * fade * 0.85;
                    cr = ico_blend(cr, 0x57, glow);
                    cg = ico_blend(cg, 0xd6, glow);
                    cb = ico_blend(cb, 0x8f, glow);
                }

                for ring in rings {
                    let ring_r = dial_radius * ring;
                    let band = (dist - ring_r).abs();
                    if band < ring_half_width + 1.0 {
                        let ring_aa = ico_coverage(band, ring_half_width);
                        cr = ico_blend(cr, 0x6d, ring_aa * 0.55);
                        cg = ico_blend(cg, 0x83, ring_aa * 0.55);
                        cb = ico_blend(cb, 0xa4, ring_aa * 0.55);
                    }
                }
            }

            let bezel_half = (s * 0.022).max(0.75);
            let bezel_band = (dist - dial_radius).abs();
            if bezel_band < bezel_half + 1.5 {
                let bezel_aa = ico_coverage(bezel_band, bezel_half);
                cr = ico_blend(cr, 0x89, bezel_aa);
                cg = ico_blend(cg, 0xb4, bezel_aa);
                cb = ico_blend(cb, 0xfa, bezel_aa);
                ca = ca + (1.0 - ca) * bezel_aa;
            }

            let bdx = px - blip_x;
            let bdy = py - blip_y;
            let bdist = (bdx * bdx + bdy * bdy).sqrt();
            if bdist < blip_radius * 2.5 {
                let core = ico_coverage(bdist, blip_radius);
                let halo = (1.0 - bdist / (blip_radius * 2.5)).max(0.0) * 0.35;
                let strength = (core + halo).min(1.0);
                cr = ico_blend(cr, 0xa6, strength);
                cg = ico_blend(cg, 0xe3, strength);
                cb = ico_blend(cb, 0xa1, strength);
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

fn ico_coverage(dist: f32, edge: f32) -> f32 {
    let d = dist - edge;
    if d < -1.0 {
        1.0
    } else if d > 1.0 {
        0.0
    } else {
        0.5 - d * 0.5
    }
}

fn ico_blend(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 * (1.0 - t) + b as f32 * t).clamp(0.0, 255.0) as u8
}
