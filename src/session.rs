use crate::{schedule::RandomSource, store::KeyValueStore};

const SESSION_KEY: &str = "customer_session_id";
const TABLE_KEY: &str = "tableNumber";

/// The id this device orders under, created on first use
pub fn session_id(
    store: &mut impl KeyValueStore,
    unix_ms: u128,
    rng: &mut impl RandomSource,
) -> String {
    if let Some(id) = store.get(SESSION_KEY).filter(|id| !id.is_empty()) {
        return id;
    }

    const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let suffix = (0..9)
        .map(|_| ALPHABET[rng.below(36) as usize] as char)
        .collect::<String>();

    let id = format!("session_{unix_ms}_{suffix}");
    log::info!("new customer session: {id}");
    store.set(SESSION_KEY, id.clone());
    id
}

pub fn table_number(store: &impl KeyValueStore) -> Option<String> {
    store
        .get(TABLE_KEY)
        .map(|table| table.trim().to_string())
        .filter(|table| !table.is_empty())
}

pub fn set_table_number(store: &mut impl KeyValueStore, table: &str) {
    let table = table.trim();
    if table.is_empty() {
        store.remove(TABLE_KEY);
        return;
    }
    log::debug!("sitting at table {table}");
    store.set(TABLE_KEY, table.to_string())
}

/// Finds `--table <n>` or `--table=<n>` on the command line
pub fn table_from_args<I>(args: I) -> Option<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let arg = arg.as_ref();
        if let Some(table) = arg.strip_prefix("--table=") {
            return Some(table.to_string()).filter(|s| !s.is_empty());
        }
        if arg == "--table" {
            return args
                .next()
                .map(|s| s.as_ref().to_string())
                .filter(|s| !s.is_empty());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        schedule::testing::{FixedRandom, SequenceRandom},
        store::MemoryStore,
    };

    #[test]
    fn session_is_created_once() {
        let mut store = MemoryStore::new();
        let id = session_id(&mut store, 1_700_000_000_000, &mut FixedRandom(0.0));
        assert_eq!(id, "session_1700000000000_000000000");

        let again = session_id(&mut store, 42, &mut FixedRandom(0.9));
        assert_eq!(again, id);
    }

    #[test]
    fn session_suffix_is_base36() {
        let mut store = MemoryStore::new();
        let mut rng = SequenceRandom::new([0.0, 0.5, 0.99, 0.3]);
        let id = session_id(&mut store, 7, &mut rng);

        let suffix = id.rsplit('_').next().unwrap();
        assert_eq!(suffix.len(), 9);
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert!(suffix.starts_with("0iz"));
    }

    #[test]
    fn table_numbers() {
        let mut store = MemoryStore::new();
        assert_eq!(table_number(&store), None);

        set_table_number(&mut store, " 12 ");
        assert_eq!(table_number(&store).as_deref(), Some("12"));

        set_table_number(&mut store, "");
        assert_eq!(table_number(&store), None);
    }

    #[test]
    fn table_argument() {
        assert_eq!(table_from_args(["bistro", "--table", "4"]).as_deref(), Some("4"));
        assert_eq!(table_from_args(["bistro", "--table=9"]).as_deref(), Some("9"));
        assert_eq!(table_from_args(["bistro", "--table"]), None);
        assert_eq!(table_from_args(["bistro"]), None);
    }
}
