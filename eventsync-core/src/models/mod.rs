mod cms_event;
mod crm_event;
mod social;

pub use cms_event::CmsEvent;
pub use crm_event::CrmEvent;
pub use social::{SocialChannel, SocialMedia};

use serde::{Deserialize, Deserializer};

/// Treats an explicit JSON `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
