use crate::error::SerdeErr;

/// Reads bits back out of a buffer produced by a
/// [`BitWriter`](crate::BitWriter), in the same LSB-first order.
pub struct BitReader<'b> {
    buffer: &'b [u8],
    buffer_index: usize,
    scratch: u8,
    scratch_index: u8,
}

impl<'b> BitReader<'b> {
    pub fn new(buffer: &'b [u8]) -> Self {
        Self {
            buffer,
            buffer_index: 0,
            scratch: 0,
            scratch_index: 0,
        }
    }

    pub fn read_bit(&mut self) -> Result<bool, SerdeErr> {
        if self.scratch_index == 0 {
            if self.buffer_index >= self.buffer.len() {
                return Err(SerdeErr::OutOfBits);
            }
            self.scratch = self.buffer[self.buffer_index];
            self.buffer_index += 1;
            self.scratch_index = 8;
        }

        let bit = self.scratch & 1 != 0;
        self.scratch >>= 1;
        self.scratch_index -= 1;
        Ok(bit)
    }

    pub fn read_byte(&mut self) -> Result<u8, SerdeErr> {
        let mut output = 0u8;
        for i in 0..8 {
            if self.read_bit()? {
                output |= 1 << i;
            }
        }
        Ok(output)
    }
}
