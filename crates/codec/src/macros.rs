//! Macros for the byte-vector and digest newtypes

#[macro_export]
/// Implement `serde::Serialize` and `serde::Deserialize` by passing through to the hex
macro_rules! impl_hex_serde {
    ($item:ty) => {
        impl serde::Serialize for $item {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                let s = $crate::ser::ByteFormat::serialize_hex(self)
                    .map_err(|e| serde::ser::Error::custom(e.to_string()))?;
                serializer.serialize_str(&s)
            }
        }

        impl<'de> serde::Deserialize<'de> for $item {
            fn deserialize<D>(deserializer: D) -> Result<$item, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s: String = serde::Deserialize::deserialize(deserializer)?;
                <$item as $crate::ser::ByteFormat>::deserialize_hex(&s)
                    .map_err(|e| serde::de::Error::custom(e.to_string()))
            }
        }
    };
}

#[macro_export]
/// Wrap a compact-size prefixed vector of bytes (`u8`) in a newtype, and implement convenience
/// functions for it.
macro_rules! wrap_prefixed_byte_vector {
    (
        $(#[$outer:meta])*
        $wrapper_name:ident
    ) => {
        $(#[$outer])*
        #[derive(Clone, Debug, Eq, PartialEq, Default, Hash, PartialOrd, Ord)]
        pub struct $wrapper_name(Vec<u8>);

        impl $crate::ser::ByteFormat for $wrapper_name {
            type Error = $crate::ser::SerError;

            fn serialized_length(&self) -> usize {
                self.len() + self.len_prefix() as usize
            }

            fn read_from<R>(reader: &mut R, _limit: usize) -> Result<Self, Self::Error>
            where
                R: std::io::Read
            {
                Ok($crate::ser::read_prefixed_bytes(reader)?.into())
            }

            fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
            where
                W: std::io::Write
            {
                $crate::ser::write_prefixed_bytes(writer, &self.0)
            }
        }

        impl_hex_serde!($wrapper_name);

        impl std::convert::AsRef<[u8]> for $wrapper_name {
            fn as_ref(&self) -> &[u8] {
                &self.0[..]
            }
        }

        impl $wrapper_name {
            /// Instantate a new wrapped vector
            pub fn new(v: Vec<u8>) -> Self {
                Self(v)
            }

            /// Construct an empty wrapped vector instance.
            pub fn null() -> Self {
                Self(vec![])
            }

            /// Return a reference to the underlying bytes
            pub fn items(&self) -> &[u8] {
                &self.0
            }

            /// Return the length of the item vector.
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// Return true if the length of the item vector is 0.
            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }

            /// Determine the byte-length of the vector length prefix
            pub fn len_prefix(&self) -> u8 {
                $crate::ser::prefix_byte_len(self.len() as u64)
            }

            /// Decode from unprefixed hex, as found in explorer JSON.
            pub fn from_hex(s: &str) -> $crate::ser::SerResult<Self> {
                Ok(Self(hex::decode(s)?))
            }

            /// Encode to unprefixed hex.
            pub fn to_hex(&self) -> String {
                hex::encode(&self.0)
            }
        }

        impl From<&[u8]> for $wrapper_name {
            fn from(v: &[u8]) -> Self {
                Self(v.to_vec())
            }
        }

        impl From<Vec<u8>> for $wrapper_name {
            fn from(v: Vec<u8>) -> Self {
                Self(v)
            }
        }

        impl From<$wrapper_name> for Vec<u8> {
            fn from(w: $wrapper_name) -> Vec<u8> {
                w.0
            }
        }
    }
}

#[macro_export]
/// Make a new marked 32-byte double-sha2 digest. The inner array is held in internal
/// (little-endian) byte order.
macro_rules! mark_32_byte_hash {
    (
        $(#[$outer:meta])*
        $hash_name:ident
    ) => {
        $(#[$outer])*
        #[derive(Hash, Copy, Clone, Default, Eq, PartialEq, PartialOrd, Ord)]
        pub struct $hash_name(pub $crate::hashes::Hash256Digest);

        impl $hash_name {
            /// Deserialize from BE (block explorer) hex
            pub fn from_be_hex(be: &str) -> $crate::ser::SerResult<Self> {
                let le = <Self as $crate::ser::ByteFormat>::deserialize_hex(be)?;
                Ok($crate::hashes::MarkedDigest::reversed(&le))
            }

            /// Convert to BE (block explorer) hex
            pub fn to_be_hex(&self) -> String {
                hex::encode($crate::hashes::MarkedDigest::reversed(self).0)
            }

            /// Instantiate from a 32-byte slice in internal byte order. `None` if the slice has
            /// the wrong length.
            pub fn from_slice(bytes: &[u8]) -> Option<Self> {
                <$crate::hashes::Hash256Digest>::try_from(bytes).ok().map(Self)
            }
        }

        impl From<$crate::hashes::Hash256Digest> for $hash_name {
            fn from(bytes: $crate::hashes::Hash256Digest) -> Self {
                Self(bytes)
            }
        }

        impl AsRef<[u8]> for $hash_name {
            fn as_ref(&self) -> &[u8] {
                &self.0[..]
            }
        }

        impl std::fmt::Display for $hash_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.to_be_hex())
            }
        }

        impl std::fmt::Debug for $hash_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($hash_name), self.to_be_hex())
            }
        }

        impl std::str::FromStr for $hash_name {
            type Err = $crate::ser::SerError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_be_hex(s)
            }
        }

        impl $crate::ser::ByteFormat for $hash_name {
            type Error = $crate::ser::SerError;

            fn serialized_length(&self) -> usize {
                32
            }

            fn read_from<R>(reader: &mut R, _limit: usize) -> $crate::ser::SerResult<Self>
            where
                R: std::io::Read,
                Self: std::marker::Sized
            {
                let mut buf = <$crate::hashes::Hash256Digest>::default();
                reader.read_exact(&mut buf)?;
                Ok(Self(buf))
            }

            fn write_to<W>(&self, writer: &mut W) -> $crate::ser::SerResult<usize>
            where
                W: std::io::Write
            {
                writer.write_all(&self.0)?;
                Ok(32)
            }
        }

        impl $crate::hashes::MarkedDigest for $hash_name {
            fn new(hash: $crate::hashes::Hash256Digest) -> Self {
                Self(hash)
            }

            fn internal(&self) -> $crate::hashes::Hash256Digest {
                self.0
            }
        }

        impl serde::Serialize for $hash_name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.to_be_hex())
            }
        }

        impl<'de> serde::Deserialize<'de> for $hash_name {
            fn deserialize<D>(deserializer: D) -> Result<$hash_name, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s: String = serde::Deserialize::deserialize(deserializer)?;
                Self::from_be_hex(&s).map_err(|e| serde::de::Error::custom(e.to_string()))
            }
        }
    }
}
