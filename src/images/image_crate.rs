use image::{ImageBuffer, Pixel};

use crate::images::{DynamicImage, TypedImage};
use crate::pixels::Element;
use crate::{Extent, ImageConversionError};

/// Converts pixels of the `image` crate (channels of one pixel are
/// adjacent) into planes of channels.
fn to_planes<P: Pixel>(
    buffer: &ImageBuffer<P, Vec<P::Subpixel>>,
) -> TypedImage<'static, P::Subpixel>
where
    P::Subpixel: Element,
{
    let channels = P::CHANNEL_COUNT as usize;
    let extent = Extent::new(
        buffer.width() as usize,
        buffer.height() as usize,
        1,
        channels,
    );
    let plane_size = extent.width * extent.height;
    let mut pixels = vec![P::Subpixel::default(); extent.size()];
    for (i, pixel) in buffer.as_raw().chunks_exact(channels).enumerate() {
        for (c, &value) in pixel.iter().enumerate() {
            pixels[c * plane_size + i] = value;
        }
    }
    TypedImage::from_vec_unchecked(extent, pixels)
}

fn from_planes<P: Pixel>(
    image: &TypedImage<'_, P::Subpixel>,
) -> Result<ImageBuffer<P, Vec<P::Subpixel>>, ImageConversionError>
where
    P::Subpixel: Element,
{
    let extent = image.extent();
    let unsupported = ImageConversionError::UnsupportedExtent(extent);
    if extent.depth != 1 || extent.spectrum != P::CHANNEL_COUNT as usize {
        return Err(unsupported);
    }
    let width = u32::try_from(extent.width).map_err(|_| unsupported)?;
    let height = u32::try_from(extent.height).map_err(|_| unsupported)?;
    let plane_size = extent.width * extent.height;
    let planes = image.pixels();
    let raw: Vec<P::Subpixel> = (0..plane_size)
        .flat_map(|i| (0..extent.spectrum).map(move |c| planes[c * plane_size + i]))
        .collect();
    ImageBuffer::from_raw(width, height, raw).ok_or(unsupported)
}

impl TryFrom<&image::DynamicImage> for DynamicImage {
    type Error = ImageConversionError;

    fn try_from(image: &image::DynamicImage) -> Result<Self, Self::Error> {
        use image::DynamicImage as Src;

        let res = match image {
            Src::ImageLuma8(buffer) => Self::U8(to_planes(buffer)),
            Src::ImageLumaA8(buffer) => Self::U8(to_planes(buffer)),
            Src::ImageRgb8(buffer) => Self::U8(to_planes(buffer)),
            Src::ImageRgba8(buffer) => Self::U8(to_planes(buffer)),
            Src::ImageLuma16(buffer) => Self::U16(to_planes(buffer)),
            Src::ImageLumaA16(buffer) => Self::U16(to_planes(buffer)),
            Src::ImageRgb16(buffer) => Self::U16(to_planes(buffer)),
            Src::ImageRgba16(buffer) => Self::U16(to_planes(buffer)),
            Src::ImageRgb32F(buffer) => Self::F32(to_planes(buffer)),
            Src::ImageRgba32F(buffer) => Self::F32(to_planes(buffer)),
            _ => return Err(ImageConversionError::UnsupportedColorType),
        };
        Ok(res)
    }
}

impl TryFrom<&DynamicImage> for image::DynamicImage {
    type Error = ImageConversionError;

    /// Images with 1-4 channels of `u8` or `u16` values and images
    /// with 3-4 channels of `f32` values are supported.
    fn try_from(image: &DynamicImage) -> Result<Self, Self::Error> {
        use image::DynamicImage as Dst;

        let spectrum = image.extent().spectrum;
        let res = match image {
            DynamicImage::U8(typed) => match spectrum {
                1 => Dst::ImageLuma8(from_planes(typed)?),
                2 => Dst::ImageLumaA8(from_planes(typed)?),
                3 => Dst::ImageRgb8(from_planes(typed)?),
                _ => Dst::ImageRgba8(from_planes(typed)?),
            },
            DynamicImage::U16(typed) => match spectrum {
                1 => Dst::ImageLuma16(from_planes(typed)?),
                2 => Dst::ImageLumaA16(from_planes(typed)?),
                3 => Dst::ImageRgb16(from_planes(typed)?),
                _ => Dst::ImageRgba16(from_planes(typed)?),
            },
            DynamicImage::F32(typed) => match spectrum {
                3 => Dst::ImageRgb32F(from_planes(typed)?),
                _ => Dst::ImageRgba32F(from_planes(typed)?),
            },
            _ => {
                return Err(ImageConversionError::UnsupportedPixelType(
                    image.pixel_type(),
                ))
            }
        };
        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImageView;
    use image::{Rgb, RgbImage};

    #[test]
    fn rgb_image_into_planes() {
        let mut src = RgbImage::new(2, 1);
        src.put_pixel(0, 0, Rgb([1, 2, 3]));
        src.put_pixel(1, 0, Rgb([4, 5, 6]));
        let src_image = image::DynamicImage::ImageRgb8(src.clone());
        let image = DynamicImage::try_from(&src_image).unwrap();
        assert_eq!(image.extent(), Extent::new(2, 1, 1, 3));
        let typed = image.typed_image::<u8>().unwrap();
        assert_eq!(typed.pixels(), &[1, 4, 2, 5, 3, 6]);
        assert_eq!(typed.get_pixel(1, 0, 0, 2), Some(6));

        let dst = image::DynamicImage::try_from(&image).unwrap();
        assert_eq!(dst.to_rgb8(), src);
    }

    #[test]
    fn unsupported_images() {
        let image = DynamicImage::new(Extent::new(2, 2, 1, 1), crate::PixelType::F64);
        assert_eq!(
            image::DynamicImage::try_from(&image).unwrap_err(),
            ImageConversionError::UnsupportedPixelType(crate::PixelType::F64)
        );
        let image = DynamicImage::new(Extent::new(2, 2, 2, 1), crate::PixelType::U8);
        assert!(matches!(
            image::DynamicImage::try_from(&image),
            Err(ImageConversionError::UnsupportedExtent(_))
        ));
    }
}
