use crate::{bit_reader::BitReader, bit_writer::BitWrite, error::SerdeErr};

/// A type that can be serialized to and from a bit stream.
pub trait Serde: Sized + Clone + PartialEq {
    /// Serialize into the given writer
    fn ser(&self, writer: &mut dyn BitWrite);

    /// Deserialize from the given reader
    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr>;

    /// Exact number of bits `ser` will write for this value
    fn bit_length(&self) -> u32;
}

impl Serde for bool {
    fn ser(&self, writer: &mut dyn BitWrite) {
        writer.write_bit(*self);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        reader.read_bit()
    }

    fn bit_length(&self) -> u32 {
        1
    }
}

impl Serde for u8 {
    fn ser(&self, writer: &mut dyn BitWrite) {
        writer.write_byte(*self);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        reader.read_byte()
    }

    fn bit_length(&self) -> u32 {
        8
    }
}

impl Serde for u16 {
    fn ser(&self, writer: &mut dyn BitWrite) {
        let bytes = self.to_le_bytes();
        writer.write_byte(bytes[0]);
        writer.write_byte(bytes[1]);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let low = reader.read_byte()?;
        let high = reader.read_byte()?;
        Ok(u16::from_le_bytes([low, high]))
    }

    fn bit_length(&self) -> u32 {
        16
    }
}
