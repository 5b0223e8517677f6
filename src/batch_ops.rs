//! Parallel sealing/opening over slices (`batch-ops` feature).
//!
//! Relies on [`EnvelopeCipher`] being `Sync`: one instance is shared across the rayon
//! pool. The first failure aborts the batch and is returned.

use rayon::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec::ValueCodec;
use crate::{AesEnvelopeError, EnvelopeCipher};

pub fn encrypt_batch<T, C>(
    cipher: &EnvelopeCipher<C>,
    values: &[T],
) -> Result<Vec<String>, AesEnvelopeError>
where
    T: Serialize + Sync,
    C: ValueCodec,
{
    values.par_iter().map(|value| cipher.encrypt(value)).collect()
}

pub fn decrypt_batch<T, S, C>(
    cipher: &EnvelopeCipher<C>,
    envelopes: &[S],
) -> Result<Vec<T>, AesEnvelopeError>
where
    T: DeserializeOwned + Send,
    S: AsRef<str> + Sync,
    C: ValueCodec,
{
    envelopes
        .par_iter()
        .map(|envelope| cipher.decrypt(envelope.as_ref()))
        .collect()
}
