use serde::{Deserialize, Serialize};

/// Input for creating a customer; the id is assigned by the storage backend.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RegistrationRequest {
    pub name: String,
    pub email: String,
    pub age: i32,
}

/// Input for overwriting an existing customer's mutable fields.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct UpdateRequest {
    pub name: String,
    pub email: String,
    pub age: i32,
}

/// A customer that has not been persisted yet.
#[derive(Clone, Debug)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub age: i32,
}

impl From<RegistrationRequest> for NewCustomer {
    fn from(r: RegistrationRequest) -> Self {
        Self { name: r.name, email: r.email, age: r.age }
    }
}
