use crate::errors::CreationError;

/// An owned buffer of packed RGBA pixels.
///
/// Each pixel is four bytes in fixed order: red, green, blue, alpha.
/// Buffers decoded from compressed formats know their dimensions; buffers
/// read from headerless `.rgba` files do not, and are only comparable by
/// length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pub(crate) data: Vec<[u8; 4]>,
    pub(crate) dimensions: Option<(usize, usize)>,
}

impl PixelBuffer {
    /// Create a new [`PixelBuffer`] with the given data, width and height.
    ///
    /// # Errors
    /// - If data length does not match `width * height`
    pub fn new(
        data: Vec<[u8; 4]>,
        width: usize,
        height: usize,
    ) -> Result<Self, CreationError> {
        if data.len() != width * height {
            return Err(CreationError::ResolutionMismatch);
        }

        Ok(Self {
            data,
            dimensions: Some((width, height)),
        })
    }

    /// Create a dimensionless [`PixelBuffer`] from headerless packed RGBA
    /// bytes.
    ///
    /// # Errors
    /// - If the byte length is zero or not a multiple of 4
    pub fn from_packed_bytes(bytes: &[u8]) -> Result<Self, CreationError> {
        if bytes.is_empty() || bytes.len() % 4 != 0 {
            return Err(CreationError::UnalignedLength);
        }

        let data = bytes
            .chunks_exact(4)
            .map(|px| [px[0], px[1], px[2], px[3]])
            .collect();

        Ok(Self {
            data,
            dimensions: None,
        })
    }

    #[must_use]
    #[inline(always)]
    pub fn data(&self) -> &[[u8; 4]] {
        &self.data
    }

    #[must_use]
    #[inline(always)]
    pub fn data_mut(&mut self) -> &mut [[u8; 4]] {
        &mut self.data
    }

    #[must_use]
    #[inline(always)]
    pub fn into_data(self) -> Vec<[u8; 4]> {
        self.data
    }

    /// Width and height, when known. Raw `.rgba` reads report `None`.
    #[must_use]
    #[inline(always)]
    pub const fn dimensions(&self) -> Option<(usize, usize)> {
        self.dimensions
    }

    /// Number of pixels in the buffer.
    #[must_use]
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Length in bytes; always an exact multiple of 4.
    #[must_use]
    #[inline(always)]
    pub fn byte_len(&self) -> usize {
        self.data.len() * 4
    }

    /// The pixel data flattened to packed bytes, for headerless output.
    #[must_use]
    pub fn to_packed_bytes(&self) -> Vec<u8> {
        self.data.iter().flatten().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_short_data() {
        let result = PixelBuffer::new(vec![[0u8; 4]; 3], 2, 2);
        assert_eq!(result.unwrap_err(), CreationError::ResolutionMismatch);
    }

    #[test]
    fn from_packed_bytes_rejects_misaligned_lengths() {
        for len in [1usize, 2, 3, 5, 7] {
            let bytes = vec![0u8; len];
            let result = PixelBuffer::from_packed_bytes(&bytes);
            assert_eq!(result.unwrap_err(), CreationError::UnalignedLength);
        }
    }

    #[test]
    fn from_packed_bytes_rejects_empty_input() {
        let result = PixelBuffer::from_packed_bytes(&[]);
        assert_eq!(result.unwrap_err(), CreationError::UnalignedLength);
    }

    #[test]
    fn packed_bytes_round_trip() {
        let bytes = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let buf = PixelBuffer::from_packed_bytes(&bytes).unwrap();
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.byte_len(), 8);
        assert_eq!(buf.dimensions(), None);
        assert_eq!(buf.data(), &[[1, 2, 3, 4], [5, 6, 7, 8]]);
        assert_eq!(buf.to_packed_bytes(), bytes);
    }
}
