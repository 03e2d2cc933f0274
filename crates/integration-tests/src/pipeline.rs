//! Full-pipeline flows: genesis JSON in, RPC block JSON out.
