use std::borrow::Cow;

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::error::OrbitViewError;
use crate::scene::TextureImage;

/// Decode a PNG or JPEG into tightly packed RGBA8.
///
/// With `flip_y` the rows are reversed so the image's bottom row lands at
/// v = 0, matching how glTF exporters that assume a flipped upload lay out
/// their texture coordinates.
pub fn decode_texture(bytes: &[u8], flip_y: bool) -> Result<TextureImage, OrbitViewError> {
    let mut rgba = image::load_from_memory(bytes)?.to_rgba8();
    if flip_y {
        imageops::flip_vertical_in_place(&mut rgba);
    }
    let (width, height) = rgba.dimensions();
    Ok(TextureImage {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

fn to_rgba_image(texture: &TextureImage) -> Option<RgbaImage> {
    RgbaImage::from_raw(texture.width, texture.height, texture.rgba.clone())
}

fn from_rgba_image(image: RgbaImage) -> TextureImage {
    let (width, height) = image.dimensions();
    TextureImage {
        width,
        height,
        rgba: image.into_raw(),
    }
}

/// Shrink `texture` so neither side exceeds `max_dimension`, keeping its
/// aspect ratio. Textures that already fit are borrowed unchanged.
pub fn fit_within(texture: &TextureImage, max_dimension: u32) -> Cow<'_, TextureImage> {
    let largest = texture.width.max(texture.height);
    if max_dimension == 0 || largest <= max_dimension {
        return Cow::Borrowed(texture);
    }
    let Some(image) = to_rgba_image(texture) else {
        return Cow::Borrowed(texture);
    };
    let scale = f64::from(max_dimension) / f64::from(largest);
    let width = ((f64::from(texture.width) * scale).round() as u32).clamp(1, max_dimension);
    let height =
        ((f64::from(texture.height) * scale).round() as u32).clamp(1, max_dimension);
    log::warn!(
        "texture is {}x{}, above the device limit of {max_dimension}; resized to {width}x{height}",
        texture.width,
        texture.height
    );
    Cow::Owned(from_rgba_image(imageops::resize(
        &image,
        width,
        height,
        FilterType::Triangle,
    )))
}

/// Mip levels, full size first, halving down to 1x1.
pub fn mip_chain(texture: &TextureImage) -> Vec<TextureImage> {
    let mut levels = vec![texture.clone()];
    let Some(mut current) = to_rgba_image(texture) else {
        return levels;
    };
    while current.width() > 1 || current.height() > 1 {
        let width = (current.width() / 2).max(1);
        let height = (current.height() / 2).max(1);
        current = imageops::resize(&current, width, height, FilterType::Triangle);
        levels.push(from_rgba_image(current.clone()));
    }
    levels
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ImageFormat, RgbaImage};

    use super::*;

    /// 1x2 PNG: red on top, blue below.
    fn two_row_png() -> Vec<u8> {
        let img =
            RgbaImage::from_raw(1, 2, vec![255, 0, 0, 255, 0, 0, 255, 255]).unwrap();
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn decodes_without_flip() {
        let tex = decode_texture(&two_row_png(), false).unwrap();
        assert_eq!((tex.width, tex.height), (1, 2));
        assert_eq!(tex.rgba, vec![255, 0, 0, 255, 0, 0, 255, 255]);
    }

    #[test]
    fn flip_reverses_rows() {
        let tex = decode_texture(&two_row_png(), true).unwrap();
        assert_eq!(tex.rgba, vec![0, 0, 255, 255, 255, 0, 0, 255]);
    }

    fn solid(width: u32, height: u32) -> TextureImage {
        TextureImage {
            width,
            height,
            rgba: [10, 20, 30, 255].repeat((width * height) as usize),
        }
    }

    #[test]
    fn oversized_textures_shrink_to_the_limit() {
        let big = solid(64, 16);
        let fitted = fit_within(&big, 32);
        assert!(matches!(fitted, Cow::Owned(_)));
        assert_eq!((fitted.width, fitted.height), (32, 8));
        assert_eq!(fitted.rgba.len(), 32 * 8 * 4);
        assert_eq!(&fitted.rgba[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn textures_within_the_limit_are_borrowed() {
        let small = solid(16, 16);
        assert!(matches!(fit_within(&small, 16), Cow::Borrowed(_)));
        assert!(matches!(fit_within(&small, 0), Cow::Borrowed(_)));
    }

    #[test]
    fn mip_chain_halves_to_one_texel() {
        let levels = mip_chain(&solid(4, 2));
        let sizes: Vec<_> = levels.iter().map(|l| (l.width, l.height)).collect();
        assert_eq!(sizes, vec![(4, 2), (2, 1), (1, 1)]);
        assert_eq!(levels[2].rgba, vec![10, 20, 30, 255]);
        assert_eq!(mip_chain(&TextureImage::white()).len(), 1);
    }

    #[test]
    fn undecodable_bytes_are_texture_errors() {
        let err = decode_texture(b"definitely not a png", false).unwrap_err();
        assert!(matches!(err, OrbitViewError::TextureDecode(_)));
    }
}
