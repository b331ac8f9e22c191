use error_stack::{Report, ResultExt};
use kernel::KernelError;
use vodca::References;

static PORT: &str = "PORT";
static STORE: &str = "BOOKSHELF_STORE";
const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

/// Process settings read from the environment (and `.env`, when present).
#[derive(Debug, References)]
pub struct ServerConfig {
    port: u16,
    store: StoreKind,
}

impl ServerConfig {
    pub fn load() -> error_stack::Result<Self, KernelError> {
        let port = match dotenvy::var(PORT) {
            Ok(port) => port
                .trim()
                .parse::<u16>()
                .change_context(KernelError::Internal)
                .attach_printable_lazy(|| format!("Invalid {PORT}: {port}"))?,
            Err(_) => DEFAULT_PORT,
        };
        let store = match dotenvy::var(STORE).ok().as_deref() {
            None | Some("postgres") => StoreKind::Postgres,
            Some("memory") => StoreKind::Memory,
            Some(other) => {
                return Err(Report::new(KernelError::Internal).attach_printable(format!(
                    "Unknown {STORE}: {other} (expected `postgres` or `memory`)"
                )))
            }
        };
        Ok(Self { port, store })
    }
}
