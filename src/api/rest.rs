use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{error, info};
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Reply};

use crate::dashboard::{Dashboard, DashboardError};
use crate::monitoring::{self, Status};
use crate::patient::{Patient, PatientId};
use crate::storage::{PatientRepository, StorageError};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusBody {
    pub id: PatientId,
    pub status: Status,
}

pub struct RestApi<R> {
    dashboard: Arc<Dashboard<R>>,
}

impl<R: PatientRepository + 'static> RestApi<R> {
    pub fn new(dashboard: Arc<Dashboard<R>>) -> Self {
        RestApi { dashboard }
    }

    pub fn routes(&self) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        self.list_patients()
            .or(self.get_patient())
            .or(self.put_patient())
            .or(self.get_status())
            .or(self.get_alerts())
    }

    fn list_patients(&self) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let dashboard = Arc::clone(&self.dashboard);

        warp::path!("api" / "patients")
            .and(warp::get())
            .and_then(move || {
                let dashboard = Arc::clone(&dashboard);
                async move {
                    let reply = match dashboard.repository().list_patients() {
                        Ok(patients) => warp::reply::json(&patients).into_response(),
                        Err(err) => storage_failure(err),
                    };
                    Ok::<Response, Infallible>(reply)
                }
            })
    }

    fn get_patient(&self) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let dashboard = Arc::clone(&self.dashboard);

        warp::path!("api" / "patients" / String)
            .and(warp::get())
            .and_then(move |id: String| {
                let dashboard = Arc::clone(&dashboard);
                async move {
                    let reply = match dashboard.repository().get_patient(&PatientId::new(id)) {
                        Ok(patient) => warp::reply::json(&patient).into_response(),
                        Err(err) => storage_failure(err),
                    };
                    Ok::<Response, Infallible>(reply)
                }
            })
    }

    fn put_patient(&self) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let dashboard = Arc::clone(&self.dashboard);

        warp::path!("api" / "patients" / String)
            .and(warp::put())
            .and(warp::body::json())
            .and_then(move |id: String, patient: Patient| {
                let dashboard = Arc::clone(&dashboard);
                async move {
                    if patient.id.as_str() != id {
                        return Ok::<Response, Infallible>(error_reply(
                            StatusCode::BAD_REQUEST,
                            format!("Patient id {} does not match path id {}", patient.id, id),
                        ));
                    }

                    let reply = match dashboard.update_patient(patient) {
                        Ok(stored) => {
                            info!(patient = %stored.id, "patient updated via API");
                            warp::reply::json(&stored).into_response()
                        }
                        Err(err) => dashboard_failure(err),
                    };
                    Ok::<Response, Infallible>(reply)
                }
            })
    }

    fn get_status(&self) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let dashboard = Arc::clone(&self.dashboard);

        warp::path!("api" / "patients" / String / "status")
            .and(warp::get())
            .and_then(move |id: String| {
                let dashboard = Arc::clone(&dashboard);
                async move {
                    let reply = match dashboard.repository().get_patient(&PatientId::new(id)) {
                        Ok(patient) => {
                            let body = StatusBody {
                                status: monitoring::classify(&patient),
                                id: patient.id,
                            };
                            warp::reply::json(&body).into_response()
                        }
                        Err(err) => storage_failure(err),
                    };
                    Ok::<Response, Infallible>(reply)
                }
            })
    }

    fn get_alerts(&self) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let dashboard = Arc::clone(&self.dashboard);

        warp::path!("api" / "alerts")
            .and(warp::get())
            .and_then(move || {
                let dashboard = Arc::clone(&dashboard);
                async move {
                    let reply = match dashboard.alerts() {
                        Ok(alerts) => warp::reply::json(&alerts).into_response(),
                        Err(err) => dashboard_failure(err),
                    };
                    Ok::<Response, Infallible>(reply)
                }
            })
    }
}

fn error_reply(status: StatusCode, message: impl Into<String>) -> Response {
    let body = ErrorBody {
        message: message.into(),
    };
    warp::reply::with_status(warp::reply::json(&body), status).into_response()
}

fn storage_failure(err: StorageError) -> Response {
    match err {
        StorageError::NotFound(_) => error_reply(StatusCode::NOT_FOUND, "Patient not found"),
        other => {
            error!(error = %other, "storage request failed");
            error_reply(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
        }
    }
}

fn dashboard_failure(err: DashboardError) -> Response {
    match err {
        DashboardError::Storage(err) => storage_failure(err),
        other => {
            error!(error = %other, "dashboard request failed");
            error_reply(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
        }
    }
}
