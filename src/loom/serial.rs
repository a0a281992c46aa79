use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};

use super::{shape::Shape, tensor::Tensor};

impl<T: Serialize, S: Shape> Serialize for Tensor<T, S> {
    fn serialize<Z: Serializer>(&self, serializer: Z) -> Result<Z::Ok, Z::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T: Deserialize<'de>, S: Shape> Deserialize<'de> for Tensor<T, S> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let elements = Vec::<T>::deserialize(deserializer)?;
        Self::try_from(elements).map_err(D::Error::custom)
    }
}
