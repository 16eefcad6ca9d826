use image4d::PixelType as Type;

#[derive(Copy, Clone, Debug, clap::ValueEnum)]
pub enum PixelType {
    Uint8,
    Uint16,
    Uint32,
    Float32,
    Float64,
}

impl From<PixelType> for Type {
    fn from(pixel_type: PixelType) -> Self {
        match pixel_type {
            PixelType::Uint8 => Type::U8,
            PixelType::Uint16 => Type::U16,
            PixelType::Uint32 => Type::U32,
            PixelType::Float32 => Type::F32,
            PixelType::Float64 => Type::F64,
        }
    }
}
