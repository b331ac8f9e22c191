use std::marker::PhantomData;

use time::OffsetDateTime;

/// Current UTC time truncated to milliseconds, the precision every store keeps.
fn now_in_millis() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    now.replace_millisecond(now.millisecond()).unwrap_or(now)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedAt<T>(OffsetDateTime, PhantomData<T>);

impl<T> CreatedAt<T> {
    pub fn new(time: impl Into<OffsetDateTime>) -> Self {
        Self(time.into(), PhantomData)
    }

    pub fn now() -> Self {
        Self::new(now_in_millis())
    }
}

impl<T> AsRef<OffsetDateTime> for CreatedAt<T> {
    fn as_ref(&self) -> &OffsetDateTime {
        &self.0
    }
}

impl<T> From<CreatedAt<T>> for OffsetDateTime {
    fn from(value: CreatedAt<T>) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatedAt<T>(OffsetDateTime, PhantomData<T>);

impl<T> UpdatedAt<T> {
    pub fn new(time: impl Into<OffsetDateTime>) -> Self {
        Self(time.into(), PhantomData)
    }

    pub fn now() -> Self {
        Self::new(now_in_millis())
    }
}

impl<T> AsRef<OffsetDateTime> for UpdatedAt<T> {
    fn as_ref(&self) -> &OffsetDateTime {
        &self.0
    }
}

impl<T> From<UpdatedAt<T>> for OffsetDateTime {
    fn from(value: UpdatedAt<T>) -> Self {
        value.0
    }
}
