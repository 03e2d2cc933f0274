use genblock_state::StateError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenesisError {
    #[error("can't commit genesis block with number {0} > 0")]
    NonZeroNumber(u64),

    #[error("unsupported fork ordering: {prior} enabled at {prior_at}, but {fork} enabled at {at}")]
    ForkOrder {
        prior: &'static str,
        prior_at: u64,
        fork: &'static str,
        at: u64,
    },

    #[error("can't start clique chain without signers")]
    CliqueWithoutSigners,

    #[error(transparent)]
    State(#[from] StateError),
}
