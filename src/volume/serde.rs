use super::Volume;

impl<'de> serde::Deserialize<'de> for Volume {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        const FIELDS: &[&str] = &["width", "height", "depth", "data"];
        enum Field {
            Width,
            Height,
            Depth,
            Data,
        }

        impl<'de> serde::Deserialize<'de> for Field {
            fn deserialize<D>(deserializer: D) -> Result<Field, D::Error>
            where
                D: serde::de::Deserializer<'de>,
            {
                struct FieldVisitor;

                impl<'de> serde::de::Visitor<'de> for FieldVisitor {
                    type Value = Field;

                    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                        formatter.write_str("`width`, `height`, `depth` or `data`")
                    }

                    fn visit_str<E>(self, value: &str) -> Result<Field, E>
                    where
                        E: serde::de::Error,
                    {
                        match value {
                            "width" => Ok(Field::Width),
                            "height" => Ok(Field::Height),
                            "depth" => Ok(Field::Depth),
                            "data" => Ok(Field::Data),
                            _ => Err(serde::de::Error::unknown_field(value, FIELDS)),
                        }
                    }
                }

                deserializer.deserialize_identifier(FieldVisitor)
            }
        }

        fn checked<E>(
            width: usize,
            height: usize,
            depth: usize,
            data: Vec<crate::Float>,
        ) -> Result<Volume, E>
        where
            E: serde::de::Error,
        {
            Volume::from_data(width, height, depth, data).map_err(|_| {
                serde::de::Error::custom(format_args!(
                    "data length does not match {width}x{height}x{depth}"
                ))
            })
        }

        struct VolumeVisitor;

        impl<'de> serde::de::Visitor<'de> for VolumeVisitor {
            type Value = Volume;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("struct Volume")
            }

            fn visit_seq<V>(self, mut seq: V) -> Result<Volume, V::Error>
            where
                V: serde::de::SeqAccess<'de>,
            {
                let width = seq
                    .next_element()?
                    .ok_or_else(|| serde::de::Error::invalid_length(0, &self))?;
                let height = seq
                    .next_element()?
                    .ok_or_else(|| serde::de::Error::invalid_length(1, &self))?;
                let depth = seq
                    .next_element()?
                    .ok_or_else(|| serde::de::Error::invalid_length(2, &self))?;
                let data = seq
                    .next_element()?
                    .ok_or_else(|| serde::de::Error::invalid_length(3, &self))?;
                checked(width, height, depth, data)
            }

            fn visit_map<V>(self, mut map: V) -> Result<Volume, V::Error>
            where
                V: serde::de::MapAccess<'de>,
            {
                let mut width = None;
                let mut height = None;
                let mut depth = None;
                let mut data = None;
                while let Some(key) = map.next_key()? {
                    match key {
                        Field::Width => {
                            if width.is_some() {
                                return Err(serde::de::Error::duplicate_field("width"));
                            }
                            width = Some(map.next_value()?);
                        }
                        Field::Height => {
                            if height.is_some() {
                                return Err(serde::de::Error::duplicate_field("height"));
                            }
                            height = Some(map.next_value()?);
                        }
                        Field::Depth => {
                            if depth.is_some() {
                                return Err(serde::de::Error::duplicate_field("depth"));
                            }
                            depth = Some(map.next_value()?);
                        }
                        Field::Data => {
                            if data.is_some() {
                                return Err(serde::de::Error::duplicate_field("data"));
                            }
                            data = Some(map.next_value()?);
                        }
                    }
                }
                let width = width.ok_or_else(|| serde::de::Error::missing_field("width"))?;
                let height = height.ok_or_else(|| serde::de::Error::missing_field("height"))?;
                let depth = depth.ok_or_else(|| serde::de::Error::missing_field("depth"))?;
                let data = data.ok_or_else(|| serde::de::Error::missing_field("data"))?;
                checked(width, height, depth, data)
            }
        }

        deserializer.deserialize_struct("Volume", FIELDS, VolumeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use crate::Volume;

    #[test]
    fn bincode_round_trip() {
        let mut volume = Volume::zeros(3, 2, 4);
        volume.set(2, 1, 3, 0.75);

        let bytes = bincode::serialize(&volume).unwrap();
        let back: Volume = bincode::deserialize(&bytes).unwrap();

        assert_eq!(back, volume);
    }

    #[test]
    fn rejects_mismatched_data_length() {
        let json = r#"{"width":2,"height":2,"depth":2,"data":[0.0,0.0,0.0]}"#;
        let result: Result<Volume, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
