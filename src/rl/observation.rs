use burn::tensor::{Tensor, TensorData, backend::Backend};

use crate::remote::GatewayError;

/// Shape of an observation as reported by `state_size`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateSize {
    /// Feature vector of the given length
    Flat(usize),
    /// Board bitmap with `channels` values per cell
    Grid {
        width: usize,
        height: usize,
        channels: usize,
    },
}

impl StateSize {
    /// Dimensions as a list, `(width, height, channels)` order for grids
    pub fn dims(&self) -> Vec<usize> {
        match *self {
            StateSize::Flat(len) => vec![len],
            StateSize::Grid {
                width,
                height,
                channels,
            } => vec![width, height, channels],
        }
    }

    /// Total number of scalar values
    pub fn num_elements(&self) -> usize {
        self.dims().iter().product()
    }
}

/// Anything a strategy may hand back as an observation
pub trait Observation: Clone {
    fn state_size(&self) -> StateSize;
}

impl Observation for Vec<f32> {
    fn state_size(&self) -> StateSize {
        StateSize::Flat(self.len())
    }
}

/// Full-board bitmap with three channels per cell
///
/// Values are stored column-major, matching the `[x][y][channel]` layout the
/// engine sends.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl Bitmap {
    pub const CHANNELS: usize = 3;

    /// Build a bitmap from the nested `[x][y][channel]` form sent by the engine.
    ///
    /// Ragged columns or cells without exactly three channels are rejected.
    pub fn from_columns(columns: Vec<Vec<Vec<f32>>>) -> Result<Self, GatewayError> {
        let width = columns.len();
        let height = columns.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(width * height * Self::CHANNELS);

        for (x, column) in columns.into_iter().enumerate() {
            if column.len() != height {
                return Err(GatewayError::MalformedBitmap(format!(
                    "column {} has {} rows, expected {}",
                    x,
                    column.len(),
                    height
                )));
            }
            for (y, cell) in column.into_iter().enumerate() {
                if cell.len() != Self::CHANNELS {
                    return Err(GatewayError::MalformedBitmap(format!(
                        "cell ({}, {}) has {} channels, expected {}",
                        x,
                        y,
                        cell.len(),
                        Self::CHANNELS
                    )));
                }
                data.extend(cell);
            }
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Value of one channel at a cell, `None` outside the board
    pub fn get(&self, x: usize, y: usize, channel: usize) -> Option<f32> {
        if x >= self.width || y >= self.height || channel >= Self::CHANNELS {
            return None;
        }
        self.data
            .get((x * self.height + y) * Self::CHANNELS + channel)
            .copied()
    }

    /// Raw values in `[x][y][channel]` order
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Channels-first tensor with shape `[3, height, width]`
    pub fn to_tensor<B: Backend>(&self, device: &B::Device) -> Tensor<B, 3> {
        let plane = self.width * self.height;
        let mut data = vec![0.0; Self::CHANNELS * plane];

        for x in 0..self.width {
            for y in 0..self.height {
                for c in 0..Self::CHANNELS {
                    data[c * plane + y * self.width + x] =
                        self.data[(x * self.height + y) * Self::CHANNELS + c];
                }
            }
        }

        let tensor_data = TensorData::new(data, [Self::CHANNELS, self.height, self.width]);
        Tensor::<B, 3>::from_data(tensor_data, device)
    }
}

impl Observation for Bitmap {
    fn state_size(&self) -> StateSize {
        StateSize::Grid {
            width: self.width,
            height: self.height,
            channels: Self::CHANNELS,
        }
    }
}

/// Tensor with shape `[len]` from a local feature vector
pub fn vector_tensor<B: Backend>(features: &[f32], device: &B::Device) -> Tensor<B, 1> {
    let tensor_data = TensorData::new(features.to_vec(), [features.len()]);
    Tensor::<B, 1>::from_data(tensor_data, device)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rl::backend::{InferenceBackend, default_device};

    type TestBackend = InferenceBackend;

    /// 3 wide, 2 high; channel 0 marks (2, 1), channel 2 marks (0, 0)
    fn sample_columns() -> Vec<Vec<Vec<f32>>> {
        let mut columns = vec![vec![vec![0.0; 3]; 2]; 3];
        columns[2][1][0] = 1.0;
        columns[0][0][2] = 1.0;
        columns
    }

    #[test]
    fn test_bitmap_shape() {
        let bitmap = Bitmap::from_columns(sample_columns()).unwrap();

        assert_eq!(bitmap.width(), 3);
        assert_eq!(bitmap.height(), 2);
        assert_eq!(
            bitmap.state_size(),
            StateSize::Grid {
                width: 3,
                height: 2,
                channels: 3
            }
        );
        assert_eq!(bitmap.state_size().dims(), vec![3, 2, 3]);
        assert_eq!(bitmap.as_slice().len(), 18);
    }

    #[test]
    fn test_bitmap_lookup() {
        let bitmap = Bitmap::from_columns(sample_columns()).unwrap();

        assert_eq!(bitmap.get(2, 1, 0), Some(1.0));
        assert_eq!(bitmap.get(0, 0, 2), Some(1.0));
        assert_eq!(bitmap.get(1, 1, 1), Some(0.0));
        assert_eq!(bitmap.get(3, 0, 0), None);
        assert_eq!(bitmap.get(0, 0, 3), None);
    }

    #[test]
    fn test_ragged_column_rejected() {
        let mut columns = sample_columns();
        columns[1].pop();

        let err = Bitmap::from_columns(columns).unwrap_err();
        assert!(err.to_string().contains("column 1 has 1 rows"));
    }

    #[test]
    fn test_wrong_channel_count_rejected() {
        let mut columns = sample_columns();
        columns[0][1] = vec![0.0; 4];

        assert!(Bitmap::from_columns(columns).is_err());
    }

    #[test]
    fn test_bitmap_tensor_is_channels_first() {
        let device = default_device();
        let bitmap = Bitmap::from_columns(sample_columns()).unwrap();

        let tensor = bitmap.to_tensor::<TestBackend>(&device);
        assert_eq!(tensor.shape().dims, [3, 2, 3]);

        let data = tensor.to_data();
        let values = data.as_slice::<f32>().unwrap();
        // channel 0, y = 1, x = 2
        assert_eq!(values[5], 1.0);
        // channel 2, y = 0, x = 0
        assert_eq!(values[12], 1.0);

        let sum: f32 = values.iter().sum();
        assert_eq!(sum, 2.0);
    }

    #[test]
    fn test_vector_observation() {
        let device = default_device();
        let features = vec![0.0, 1.0, 0.5, 0.25];

        assert_eq!(features.state_size(), StateSize::Flat(4));
        assert_eq!(features.state_size().num_elements(), 4);

        let tensor = vector_tensor::<TestBackend>(&features, &device);
        assert_eq!(tensor.shape().dims, [4]);
    }
}
