/// Destination for bit-granular serialization.
pub trait BitWrite {
    fn write_bit(&mut self, bit: bool);
    fn write_byte(&mut self, byte: u8);
}

/// A BitWrite implementation over a growable buffer.
///
/// Bits are packed LSB-first: the first bit written to a byte ends up in
/// that byte's lowest bit. A partially filled final byte is zero-padded
/// when the buffer is taken with `to_bytes`.
pub struct BitWriter {
    scratch: u8,
    scratch_index: u8,
    buffer: Vec<u8>,
    bits_written: u32,
}

impl BitWriter {
    pub fn new() -> Self {
        Self {
            scratch: 0,
            scratch_index: 0,
            buffer: Vec::new(),
            bits_written: 0,
        }
    }

    fn flush_scratch(&mut self) {
        if self.scratch_index > 0 {
            self.buffer.push(self.scratch);
            self.scratch = 0;
            self.scratch_index = 0;
        }
    }

    pub fn to_bytes(mut self) -> Vec<u8> {
        self.flush_scratch();
        self.buffer
    }

    pub fn bits_written(&self) -> u32 {
        self.bits_written
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl BitWrite for BitWriter {
    fn write_bit(&mut self, bit: bool) {
        if bit {
            self.scratch |= 1 << self.scratch_index;
        }

        self.scratch_index += 1;
        self.bits_written += 1;

        if self.scratch_index >= 8 {
            self.buffer.push(self.scratch);
            self.scratch_index = 0;
            self.scratch = 0;
        }
    }

    fn write_byte(&mut self, byte: u8) {
        let mut temp = byte;
        for _ in 0..8 {
            self.write_bit(temp & 1 != 0);
            temp >>= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_bytes_round_through_unchanged() {
        let mut writer = BitWriter::new();

        writer.write_byte(0b1010_1010);
        writer.write_byte(0x5C);

        let bytes = writer.to_bytes();
        assert_eq!(bytes, vec![0b1010_1010, 0x5C]);
    }

    #[test]
    fn first_written_bit_lands_in_lowest_position() {
        let mut writer = BitWriter::new();

        writer.write_bit(true);
        writer.write_bit(false);
        writer.write_bit(true);

        let bytes = writer.to_bytes();
        assert_eq!(bytes.len(), 1);
        assert_eq!(bytes[0], 0b0000_0101);
    }

    #[test]
    fn bits_written_counts_across_byte_boundaries() {
        let mut writer = BitWriter::new();

        for _ in 0..11 {
            writer.write_bit(true);
        }

        assert_eq!(writer.bits_written(), 11);
        assert_eq!(writer.to_bytes().len(), 2);
    }
}
