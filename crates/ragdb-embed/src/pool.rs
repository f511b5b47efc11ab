use anyhow::{Result, bail};
use candle_core::{DType, Tensor};

/// Mean of the hidden states over unmasked tokens, then L2-normalized.
///
/// `hidden` is `[B, T, H]`, `attention_mask` is `[B, T]`; returns `[B, H]`.
pub fn masked_mean_l2(hidden: &Tensor, attention_mask: &Tensor) -> Result<Tensor> {
    let (batch, _tokens, hidden_dim) = match hidden.dims() {
        [b, t, h] => (*b, *t, *h),
        dims => bail!("hidden states must be [B,T,H], got {:?}", dims),
    };
    let dtype = hidden.dtype();
    let mask = attention_mask.to_device(hidden.device())?.to_dtype(dtype)?;

    // [B, T, 1] scales every hidden unit of a token by its mask bit.
    let summed = hidden.broadcast_mul(&mask.unsqueeze(2)?)?.sum(1)?;
    let token_counts = mask.sum_keepdim(1)?;
    let pooled = summed.broadcast_div(&token_counts)?;

    let eps = if dtype == DType::F16 { 1e-6 } else { 1e-12 };
    let norms = pooled.sqr()?.sum_keepdim(1)?.sqrt()?.affine(1.0, eps)?;
    let normalized = pooled.broadcast_div(&norms)?;
    if normalized.dims() != [batch, hidden_dim].as_slice() {
        bail!("pooled shape {:?} != [{batch}, {hidden_dim}]", normalized.dims());
    }
    Ok(normalized)
}
