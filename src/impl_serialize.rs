use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserialize, Deserializer, Error, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::view::View;

const FIELDS: &[&str] = &["shape", "data"];

/// The elements selected by a view, serialized as a flat sequence.
struct Elements<'a, T>(&'a View<T>);

impl<T: Clone + Serialize> Serialize for Elements<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

/// Views serialize as a struct with `shape` and `data` fields, where `data`
/// holds the elements in row-major order. Sliced views serialize the elements
/// they select, so deserializing always produces a root view.
impl<T: Clone + Serialize> Serialize for View<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut fields = serializer.serialize_struct("View", FIELDS.len())?;
        fields.serialize_field("shape", self.dims())?;
        fields.serialize_field("data", &Elements(self))?;
        fields.end()
    }
}

enum Field {
    Shape,
    Data,
}

impl Field {
    fn from_key<E: Error>(key: &str) -> Result<Field, E> {
        match key {
            "shape" => Ok(Field::Shape),
            "data" => Ok(Field::Data),
            _ => Err(E::unknown_field(key, FIELDS)),
        }
    }
}

/// Store the value of a field which may appear only once.
fn set_once<V, E: Error>(slot: &mut Option<V>, value: V, name: &'static str) -> Result<(), E> {
    if slot.is_some() {
        return Err(E::duplicate_field(name));
    }
    *slot = Some(value);
    Ok(())
}

/// Create a root view from deserialized fields, checking that `shape`
/// describes exactly the elements in `data`.
fn root_view<T, E: Error>(shape: Option<Vec<usize>>, data: Option<Vec<T>>) -> Result<View<T>, E> {
    let shape = shape.ok_or_else(|| E::missing_field("shape"))?;
    let data = data.ok_or_else(|| E::missing_field("data"))?;
    View::from_data(&shape, data).map_err(E::custom)
}

struct ViewVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for ViewVisitor<T> {
    type Value = View<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a view with \"shape\" and \"data\" fields")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<View<T>, A::Error> {
        let mut shape: Option<Vec<usize>> = None;
        let mut data: Option<Vec<T>> = None;
        while let Some(key) = map.next_key::<String>()? {
            match Field::from_key::<A::Error>(&key)? {
                Field::Shape => set_once::<_, A::Error>(&mut shape, map.next_value()?, "shape")?,
                Field::Data => set_once::<_, A::Error>(&mut data, map.next_value()?, "data")?,
            }
        }
        root_view(shape, data)
    }

    /// Accept the compact `[shape, data]` form that non-self-describing
    /// formats use for structs.
    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<View<T>, A::Error> {
        let shape: Vec<usize> = seq
            .next_element()?
            .ok_or_else(|| A::Error::invalid_length(0, &self))?;
        let data: Vec<T> = seq
            .next_element()?
            .ok_or_else(|| A::Error::invalid_length(1, &self))?;
        if seq.next_element::<serde::de::IgnoredAny>()?.is_some() {
            return Err(A::Error::invalid_length(3, &self));
        }
        root_view(Some(shape), Some(data))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for View<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<View<T>, D::Error> {
        deserializer.deserialize_struct("View", FIELDS, ViewVisitor(PhantomData))
    }
}
