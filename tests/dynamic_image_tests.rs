use image4d::{
    ArithmeticError, DifferentExtentsError, DifferentTypesOfPixelsError, DynamicAccess,
    DynamicImage, Extent, ImageView, PixelType, PixelValue, TypedImage, UnknownPixelTypeError,
};
use testing::{grid_4x3, image_checksum, png_round_trip, sequence_image};


#[test]
fn pixel_type_from_str() {
    assert_eq!("uint8".parse::<PixelType>().unwrap(), PixelType::U8);
    assert_eq!("Float32".parse::<PixelType>().unwrap(), PixelType::F32);
    assert_eq!("f64".parse::<PixelType>().unwrap(), PixelType::F64);
    assert_eq!(
        "int8".parse::<PixelType>().unwrap_err(),
        UnknownPixelTypeError("int8".to_owned())
    );
    for pixel_type in PixelType::ALL {
        assert_eq!(pixel_type.name().parse::<PixelType>().unwrap(), pixel_type);
    }
}

mod dynamic_image {
    use super::*;

    #[test]
    fn new_image_is_zeroed() {
        for pixel_type in PixelType::ALL {
            let image = DynamicImage::new(Extent::new(3, 2, 2, 1), pixel_type);
            assert_eq!(image.pixel_type(), pixel_type);
            assert_eq!(image.size(), 12);
            assert_eq!(image.min_max(), Some((0., 0.)));
        }
        let image = DynamicImage::default();
        assert_eq!(image.pixel_type(), PixelType::F32);
        assert!(image.is_empty());
        assert_eq!(image.min_max(), None);
    }

    #[test]
    fn read_and_write() {
        let mut image = DynamicImage::from(grid_4x3());
        assert_eq!(
            image.read((3, 1)).unwrap(),
            DynamicAccess::Scalar(PixelValue::U8(8))
        );
        image.write_scalar((.., 1), 300.).unwrap();
        let DynamicAccess::View(row) = image.read((.., 1)).unwrap() else {
            panic!("view is expected");
        };
        assert_eq!(row.extent(), Extent::plane(4, 1));
        assert_eq!(row.min_max(), Some((255., 255.)));
        assert!(image.write_scalar((0, 3), 1.).is_err());
    }

    #[test]
    fn typed_access() {
        let mut image = DynamicImage::new(Extent::plane(2, 2), PixelType::U16);
        assert!(image.typed_image::<u8>().is_none());
        let typed = image.typed_image_mut::<u16>().unwrap();
        typed.pixels_mut().copy_from_slice(&[1, 2, 3, 4]);
        assert_eq!(
            image.read((1, 1)).unwrap(),
            DynamicAccess::Scalar(PixelValue::U16(4))
        );
    }

    #[test]
    fn convert() {
        let image = DynamicImage::from(grid_4x3());
        let float_image = image.convert(PixelType::F32);
        assert_eq!(float_image.pixel_type(), PixelType::F32);
        assert_eq!(float_image.min_max(), Some((1., 12.)));

        let mut float_image = float_image;
        float_image.fill(-2.5);
        let image = float_image.convert(PixelType::U8);
        assert_eq!(image.min_max(), Some((0., 0.)));
    }

    #[test]
    fn image_crate_round_trip() {
        let extent = Extent::new(5, 4, 1, 3);
        let image = DynamicImage::from(sequence_image::<u8>(extent));
        assert_eq!(png_round_trip(&image), image);

        let image = DynamicImage::from(sequence_image::<u16>(Extent::plane(7, 3)));
        assert_eq!(png_round_trip(&image), image);
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn images() {
        let mut image = grid_4x3();
        let other = grid_4x3();
        image.add(&other).unwrap();
        assert_eq!(image_checksum(&image), 2. * 78.);
        image.sub(&other).unwrap();
        assert!(image.equals(&other));
        image.mul(&other).unwrap();
        assert_eq!(image.pixels()[..4], [1, 4, 9, 16]);
        assert_eq!(image.pixels()[11], 144);
        image.div(&other).unwrap();
        assert_eq!(image.pixels()[..4], [1, 2, 3, 4]);
    }

    #[test]
    fn saturation() {
        let mut image = grid_4x3();
        image.mul_scalar(30);
        assert_eq!(image.pixels()[7], 240);
        assert_eq!(image.pixels()[8], 255);
        image.sub_scalar(250);
        assert_eq!(image.pixels()[0], 0);
    }

    #[test]
    fn scalars() {
        let mut image = sequence_image::<f32>(Extent::plane(3, 1));
        image.add_scalar(1.);
        image.mul_scalar(2.);
        image.sub_scalar(0.5);
        image.div_scalar(0.5);
        assert_eq!(image.pixels(), &[3., 7., 11.]);
    }

    #[test]
    fn different_extents() {
        let mut image = TypedImage::<f64>::new(Extent::plane(2, 2));
        let other = TypedImage::<f64>::new(Extent::plane(2, 3));
        assert_eq!(image.add(&other).unwrap_err(), DifferentExtentsError);
        assert!(!image.equals(&other));
    }

    #[test]
    fn equals_view() {
        let image = grid_4x3();
        let region = image.region((.., ..)).unwrap();
        assert!(image.equals(&region));
        let region = image.region((1.., ..)).unwrap();
        assert!(!image.equals(&region));
    }

    #[test]
    fn dynamic_images() {
        let mut image = DynamicImage::from(grid_4x3());
        image.mul_scalar(10.);
        image.div(&DynamicImage::from(grid_4x3())).unwrap();
        assert_eq!(image.min_max(), Some((10., 10.)));
        assert_eq!(
            image
                .add(&DynamicImage::new(image.extent(), PixelType::U16))
                .unwrap_err(),
            ArithmeticError::DifferentTypesOfPixels(DifferentTypesOfPixelsError)
        );
        assert_eq!(
            image
                .add(&DynamicImage::new(Extent::plane(1, 1), PixelType::U8))
                .unwrap_err(),
            ArithmeticError::DifferentExtents(DifferentExtentsError)
        );
    }

    #[test]
    fn floor_division() {
        let mut image = DynamicImage::new(Extent::plane(3, 1), PixelType::F32);
        image.write_scalar(0, -7.).unwrap();
        image.write_scalar(1, 7.).unwrap();
        image.write_scalar(2, -0.5).unwrap();
        let mut true_div = image.clone();

        image.floor_div_scalar(2.);
        true_div.div_scalar(2.);
        let typed = image.typed_image::<f32>().unwrap();
        assert_eq!(typed.pixels(), &[-4., 3., -1.]);
        let typed = true_div.typed_image::<f32>().unwrap();
        assert_eq!(typed.pixels(), &[-3.5, 3.5, -0.25]);

        let mut divisors = DynamicImage::new(Extent::plane(3, 1), PixelType::F32);
        divisors.fill(-3.);
        image.floor_div(&divisors).unwrap();
        assert_eq!(
            image.typed_image::<f32>().unwrap().pixels(),
            &[1., -1., 0.]
        );
        assert_eq!(
            image
                .floor_div(&DynamicImage::new(image.extent(), PixelType::F64))
                .unwrap_err(),
            ArithmeticError::DifferentTypesOfPixels(DifferentTypesOfPixelsError)
        );
    }
}

mod display {
    use super::*;

    #[test]
    fn plane() {
        let image = TypedImage::<u8>::from_array(&[2, 2], vec![1, 2, 3, 40]).unwrap();
        assert_eq!(
            image.to_string(),
            "height:       2\n\
             width:        2\n\
             depth:        1\n\
             spectrum:     1\n\
             data:    \n\
             [[[[ 1  2]\n   [ 3 40]]]]"
        );
    }

    #[test]
    fn empty_image() {
        let image = DynamicImage::default();
        assert_eq!(
            image.to_string(),
            "height:       0\n\
             width:        0\n\
             depth:        0\n\
             spectrum:     0\n\
             data:    \n\
             None"
        );
    }
}
