use crate::{bit_reader::BitReader, bit_writer::BitWrite, error::SerdeErr, serde::Serde};

/// Fixed-width unsigned wire integer occupying exactly `BITS` bits.
pub type UnsignedInteger<const BITS: u8> = WireInteger<false, BITS>;

/// Variable-width unsigned wire integer: written in `BITS`-bit groups, each
/// prefixed by a continuation bit, so small values stay small on the wire.
pub type UnsignedVariableInteger<const BITS: u8> = WireInteger<true, BITS>;

// The outer generic type wraps a non-generic inner type, to reduce code
// bloat through monomorphization.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct WireInteger<const VARIABLE: bool, const BITS: u8> {
    inner: WireIntegerInner,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
struct WireIntegerInner {
    value: u64,
    variable: bool,
    bits: u8,
}

impl WireIntegerInner {
    fn new(variable: bool, bits: u8, value: u64) -> Self {
        if bits == 0 {
            panic!("can't create an integer with 0 bits...");
        }
        if bits > 63 {
            panic!("can't create an integer with more than 63 bits...");
        }

        if !variable {
            let max_value = 1u64 << bits;
            if value >= max_value {
                panic!(
                    "with {} bits, can't encode number greater than {}",
                    bits,
                    max_value - 1
                );
            }
        }

        Self {
            value,
            variable,
            bits,
        }
    }

    fn ser(&self, writer: &mut dyn BitWrite) {
        let mut value = self.value;

        if self.variable {
            loop {
                let proceed = value >= 1u64 << self.bits;
                writer.write_bit(proceed);
                for _ in 0..self.bits {
                    writer.write_bit(value & 1 != 0);
                    value >>= 1;
                }
                if !proceed {
                    return;
                }
            }
        } else {
            for _ in 0..self.bits {
                writer.write_bit(value & 1 != 0);
                value >>= 1;
            }
        }
    }

    fn de(reader: &mut BitReader, variable: bool, bits: u8) -> Result<Self, SerdeErr> {
        let mut output = 0u64;
        let mut shift = 0u32;

        if variable {
            loop {
                let proceed = reader.read_bit()?;
                for _ in 0..bits {
                    if shift >= 64 {
                        return Err(SerdeErr::InvalidValue);
                    }
                    if reader.read_bit()? {
                        output |= 1 << shift;
                    }
                    shift += 1;
                }
                if !proceed {
                    return Ok(Self {
                        value: output,
                        variable,
                        bits,
                    });
                }
            }
        } else {
            for _ in 0..bits {
                if reader.read_bit()? {
                    output |= 1 << shift;
                }
                shift += 1;
            }
            Ok(Self {
                value: output,
                variable,
                bits,
            })
        }
    }

    fn bit_length(&self) -> u32 {
        if self.variable {
            let mut output = 0u32;
            let mut value = self.value;
            loop {
                let proceed = value >= 1u64 << self.bits;
                output += 1 + u32::from(self.bits);
                value >>= self.bits;
                if !proceed {
                    return output;
                }
            }
        } else {
            u32::from(self.bits)
        }
    }
}

impl<const VARIABLE: bool, const BITS: u8> WireInteger<VARIABLE, BITS> {
    pub fn new<T: Into<u64>>(value: T) -> Self {
        Self {
            inner: WireIntegerInner::new(VARIABLE, BITS, value.into()),
        }
    }

    pub fn get(&self) -> u64 {
        self.inner.value
    }
}

impl<const VARIABLE: bool, const BITS: u8> Serde for WireInteger<VARIABLE, BITS> {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.inner.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let inner = WireIntegerInner::de(reader, VARIABLE, BITS)?;
        Ok(Self { inner })
    }

    fn bit_length(&self) -> u32 {
        self.inner.bit_length()
    }
}
