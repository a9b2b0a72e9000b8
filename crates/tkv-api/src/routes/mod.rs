//! # API Route Modules
//!
//! | Prefix          | Module       | Auth |
//! |-----------------|--------------|------|
//! | `/v1/records/*` | [`records`]  | token gate, per operation |

pub mod records;
