//! End-to-end properties of the conversion pipeline

use std::io::Cursor;

use dotart::sample::{summarize, Reduction};
use dotart::style::StyleParams;
use dotart::{generate, DotArtOptions, Engine, ErrorKind, PixelBuffer, Stage, Style};
use image::{DynamicImage, ImageOutputFormat, Rgba, RgbaImage};

fn encode(image: RgbaImage, format: ImageOutputFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    let dynamic = match format {
        // JPEG has no alpha channel
        ImageOutputFormat::Jpeg(_) => {
            DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(image).to_rgb8())
        }
        _ => DynamicImage::ImageRgba8(image),
    };
    dynamic.write_to(&mut Cursor::new(&mut bytes), format).expect("encode fixture");
    bytes
}

fn png(image: RgbaImage) -> Vec<u8> {
    encode(image, ImageOutputFormat::Png)
}

fn photo(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 255 / width) as u8, (y * 255 / height) as u8, ((x + y) % 256) as u8, 255])
    })
}

#[test]
fn solid_images_survive_every_format() {
    let color = Rgba([40, 120, 200, 255]);
    let cases = [
        (ImageOutputFormat::Png, 0),
        (ImageOutputFormat::Jpeg(100), 4),
        (ImageOutputFormat::Bmp, 0),
        (ImageOutputFormat::Gif, 8),
    ];
    for (format, tolerance) in cases {
        let label = format!("{:?}", format);
        let bytes = encode(RgbaImage::from_pixel(12, 7, color), format);
        let decoded = dotart::decode::decode(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (12, 7), "{}", label);
        for p in decoded.as_image().pixels() {
            for c in 0..3 {
                let diff = (p[c] as i32 - color[c] as i32).abs();
                assert!(diff <= tolerance, "{}: channel {} off by {}", label, c, diff);
            }
        }
    }
}

#[test]
fn even_cell_sizes_give_exact_cell_counts() {
    let source = PixelBuffer::from_image(photo(24, 12));
    for cell_size in [1, 2, 3, 4, 6, 12] {
        let grid = summarize(&source, cell_size, Reduction::Average).unwrap();
        assert_eq!(grid.len() as u32, (24 / cell_size) * (12 / cell_size));
        assert!(grid.cells().iter().all(|c| (0.0..=1.0).contains(&c.luminance)));
    }
}

#[test]
fn cell_counts_round_up() {
    let source = PixelBuffer::from_image(photo(23, 10));
    for cell_size in 1..=30u32 {
        let grid = summarize(&source, cell_size, Reduction::Average).unwrap();
        let (cw, ch) = (cell_size.min(23), cell_size.min(10));
        let cols = (23 + cw - 1) / cw;
        let rows = (10 + ch - 1) / ch;
        assert_eq!((grid.cols(), grid.rows()), (cols, rows), "cell size {}", cell_size);
        assert_eq!(grid.len() as u32, cols * rows);
    }
}

#[test]
fn render_is_deterministic() {
    let source = PixelBuffer::from_image(photo(50, 31));
    let grid = summarize(&source, 7, Reduction::Average).unwrap();
    for style in Style::ALL {
        let a = dotart::render::render(&grid, style, &StyleParams::default());
        let b = dotart::render::render(&grid, style, &StyleParams::default());
        assert_eq!(a.as_raw(), b.as_raw(), "{}", style);
    }
}

#[test]
fn black_image_renders_full_circles() {
    let bytes = png(RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255])));
    let art = generate("circle", &bytes, &DotArtOptions::default().with_cell_size(2)).unwrap();
    assert_eq!(art.dimensions(), (4, 4));
    assert!(art.as_image().pixels().all(|p| *p == Rgba([0, 0, 0, 255])));
}

#[test]
fn white_image_renders_no_dots_with_ink_polarity() {
    let bytes = png(RgbaImage::from_pixel(8, 8, Rgba([255, 255, 255, 255])));
    let art = generate("circle", &bytes, &DotArtOptions::default().with_cell_size(4)).unwrap();
    assert!(art.as_image().pixels().all(|p| p[3] == 0));
}

#[test]
fn empty_input_fails_for_any_style_name() {
    for name in ["pixel", "circle", "ascii", "not-a-style"] {
        let err = generate(name, &[], &DotArtOptions::default()).unwrap_err();
        if name == "not-a-style" {
            assert_eq!(err.kind(), ErrorKind::UnknownStyle);
        } else {
            assert_eq!(err.kind(), ErrorKind::EmptyInput);
        }
    }
}

#[test]
fn unknown_style_fails_before_decoding() {
    let bytes = png(photo(8, 8));
    let err = generate("not-a-style", &bytes, &DotArtOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownStyle);
    assert_eq!(err.stage(), Stage::Style);
}

#[test]
fn unsupported_and_corrupt_inputs() {
    let err = generate("pixel", b"II*\0 tiff header", &DotArtOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);

    let err = generate("pixel", b"just some text", &DotArtOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);

    let bytes = png(photo(8, 8));
    let err = generate("pixel", &bytes[..bytes.len() / 2], &DotArtOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CorruptData);
}

#[test]
fn unknown_options_are_rejected() {
    let err = DotArtOptions::from_json(r#"{"cell_size": 4, "shape": "star"}"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidOption);
    let err = DotArtOptions::from_pairs([("shape", "star")]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidOption);
}

#[test]
fn concurrent_calls_match_sequential() {
    let first = png(photo(64, 48));
    let second = png(RgbaImage::from_fn(33, 41, |x, y| Rgba([(x * y % 256) as u8, 90, 30, 255])));
    let engine = Engine::new().with_options(DotArtOptions::default().with_cell_size(6));

    let expected_first = engine.generate("circle", &first).unwrap();
    let expected_second = engine.generate("ascii", &second).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let engine = &engine;
                let (style, bytes) =
                    if i % 2 == 0 { ("circle", &first) } else { ("ascii", &second) };
                scope.spawn(move || (i, engine.generate(style, bytes).unwrap()))
            })
            .collect();
        for handle in handles {
            let (i, result) = handle.join().unwrap();
            let expected = if i % 2 == 0 { &expected_first } else { &expected_second };
            assert_eq!(&result, expected, "call {}", i);
        }
    });
}
