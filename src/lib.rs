// Employee Management System API server library
// 직원 관리 시스템 API 서버 라이브러리
//
// Exposed as a library so integration tests and the bundled API client
// can reuse the same models and routers as the binary.

pub mod client;
pub mod domains;
pub mod routes;
pub mod shared;
