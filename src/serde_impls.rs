use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use std::fmt::{self, Formatter};
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;

use crate::ProbingTable;

struct TableVisitor<K, V, S> {
    _marker: PhantomData<ProbingTable<K, V, S>>,
}

impl<K, V, S> Serialize for ProbingTable<K, V, S>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<Sr>(&self, serializer: Sr) -> Result<Sr::Ok, Sr::Error>
    where
        Sr: Serializer,
    {
        serializer.collect_map(self.pairs())
    }
}

impl<'de, K, V, S> Deserialize<'de> for ProbingTable<K, V, S>
where
    K: Deserialize<'de> + Hash + Eq,
    V: Deserialize<'de>,
    S: Default + BuildHasher,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(TableVisitor::new())
    }
}

impl<K, V, S> TableVisitor<K, V, S> {
    pub(crate) fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<'de, K, V, S> Visitor<'de> for TableVisitor<K, V, S>
where
    K: Deserialize<'de> + Hash + Eq,
    V: Deserialize<'de>,
    S: Default + BuildHasher,
{
    type Value = ProbingTable<K, V, S>;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "a map")
    }

    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut table = match access.size_hint() {
            Some(size) => ProbingTable::builder()
                .capacity((size.saturating_mul(4) / 3).saturating_add(1))
                .hasher(S::default())
                .build()
                .map_err(<M::Error as de::Error>::custom)?,
            None => ProbingTable::default(),
        };

        while let Some((key, value)) = access.next_entry()? {
            table.set(key, value).map_err(<M::Error as de::Error>::custom)?;
        }

        Ok(table)
    }
}
