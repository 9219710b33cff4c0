//! Upload and download initiation: the data-plane handoff.
//!
//! After routing, the provider reports a data endpoint and an `expose`
//! flag. Exposed endpoints are returned verbatim; everything else gets
//! the endpoint swapped for the data gateway and a transfer token
//! binding the original target. Only the target URI is signed.

use url::Url;

use common::prelude::*;
use common::storage::{
    InitiateFileDownloadRequest, InitiateFileDownloadResponse, InitiateFileUploadRequest,
    InitiateFileUploadResponse, StatRequest,
};

use crate::shares::SharePath;

use super::Gateway;

impl Gateway {
    pub async fn initiate_file_download(
        &self,
        user: &User,
        mut req: InitiateFileDownloadRequest,
    ) -> InitiateFileDownloadResponse {
        // downloads stat first so that a missing file fails here
        // instead of at the data server
        let stat_res = self
            .stat_internal(&StatRequest::new(req.reference.clone()))
            .await;
        if !stat_res.status.is_ok() {
            return InitiateFileDownloadResponse {
                status: stat_res
                    .status
                    .downstream(&format!("error stating ref {}", req.reference)),
                download_endpoint: String::new(),
                token: None,
            };
        }

        let p = match self.effective_path(&req.reference, &[]).await {
            Ok(p) => p,
            Err(status) => {
                return InitiateFileDownloadResponse {
                    status,
                    download_endpoint: String::new(),
                    token: None,
                }
            }
        };

        match self.shares().classify(&p) {
            SharePath::Plain => self.download_internal(&req).await,
            SharePath::ShareFolder | SharePath::ShareName => {
                tracing::debug!(user = %user.id.opaque_id, path = %p,
                    "rejecting download of share folder or share name");
                InitiateFileDownloadResponse {
                    status: Status::invalid_argument("path points to share folder or share name"),
                    download_endpoint: String::new(),
                    token: None,
                }
            }
            SharePath::ShareChild => {
                let target = match self.rewrite_share_child(&p).await {
                    Ok(target) => target,
                    Err(status) => {
                        return InitiateFileDownloadResponse {
                            status,
                            download_endpoint: String::new(),
                            token: None,
                        }
                    }
                };
                req.reference = Reference::path(target);
                self.download_internal(&req).await
            }
        }
    }

    async fn download_internal(
        &self,
        req: &InitiateFileDownloadRequest,
    ) -> InitiateFileDownloadResponse {
        let client = match self.find(&req.reference).await {
            Ok(client) => client,
            Err(e) => {
                return InitiateFileDownloadResponse {
                    status: e.into_status(),
                    download_endpoint: String::new(),
                    token: None,
                }
            }
        };

        let storage_res = match client.initiate_file_download(req).await {
            Ok(res) => res,
            Err(e) => {
                return InitiateFileDownloadResponse {
                    status: Status::internal(format!("error calling InitiateFileDownload: {}", e)),
                    download_endpoint: String::new(),
                    token: None,
                }
            }
        };

        if !storage_res.status.is_ok() {
            return InitiateFileDownloadResponse {
                status: storage_res.status.downstream("error initiating download"),
                download_endpoint: String::new(),
                token: None,
            };
        }

        if storage_res.expose {
            tracing::info!("download is routed directly to the data server, skipping data gateway");
            return InitiateFileDownloadResponse {
                status: storage_res.status,
                download_endpoint: storage_res.download_endpoint,
                token: None,
            };
        }

        let (endpoint, token) =
            match self.sign_transfer(&storage_res.download_endpoint, "download") {
                Ok(signed) => signed,
                Err(status) => {
                    return InitiateFileDownloadResponse {
                        status,
                        download_endpoint: String::new(),
                        token: None,
                    }
                }
            };

        InitiateFileDownloadResponse {
            status: storage_res.status,
            download_endpoint: endpoint,
            token: Some(token),
        }
    }

    pub async fn initiate_file_upload(
        &self,
        user: &User,
        mut req: InitiateFileUploadRequest,
    ) -> InitiateFileUploadResponse {
        let p = match self.effective_path(&req.reference, &[]).await {
            Ok(p) => p,
            Err(status) => {
                return InitiateFileUploadResponse {
                    status,
                    upload_endpoint: String::new(),
                    token: None,
                    available_checksums: vec![],
                }
            }
        };

        match self.shares().classify(&p) {
            SharePath::Plain => self.upload_internal(&req).await,
            SharePath::ShareFolder | SharePath::ShareName => {
                tracing::debug!(user = %user.id.opaque_id, path = %p,
                    "rejecting upload to share folder or share name");
                InitiateFileUploadResponse {
                    status: Status::invalid_argument("path points to share folder or share name"),
                    upload_endpoint: String::new(),
                    token: None,
                    available_checksums: vec![],
                }
            }
            SharePath::ShareChild => {
                let target = match self.rewrite_share_child(&p).await {
                    Ok(target) => target,
                    Err(status) => {
                        return InitiateFileUploadResponse {
                            status,
                            upload_endpoint: String::new(),
                            token: None,
                            available_checksums: vec![],
                        }
                    }
                };
                req.reference = Reference::path(target);
                self.upload_internal(&req).await
            }
        }
    }

    async fn upload_internal(&self, req: &InitiateFileUploadRequest) -> InitiateFileUploadResponse {
        let client = match self.find(&req.reference).await {
            Ok(client) => client,
            Err(e) => {
                return InitiateFileUploadResponse {
                    status: e.into_status(),
                    upload_endpoint: String::new(),
                    token: None,
                    available_checksums: vec![],
                }
            }
        };

        let storage_res = match client.initiate_file_upload(req).await {
            Ok(res) => res,
            Err(e) => {
                return InitiateFileUploadResponse {
                    status: Status::internal(format!("error calling InitiateFileUpload: {}", e)),
                    upload_endpoint: String::new(),
                    token: None,
                    available_checksums: vec![],
                }
            }
        };

        if !storage_res.status.is_ok() {
            return InitiateFileUploadResponse {
                status: storage_res.status.downstream("error initiating upload"),
                upload_endpoint: String::new(),
                token: None,
                available_checksums: vec![],
            };
        }

        if storage_res.expose {
            tracing::info!("upload is routed directly to the data server, skipping data gateway");
            return InitiateFileUploadResponse {
                status: storage_res.status,
                upload_endpoint: storage_res.upload_endpoint,
                token: None,
                available_checksums: storage_res.available_checksums,
            };
        }

        let (endpoint, token) = match self.sign_transfer(&storage_res.upload_endpoint, "upload") {
            Ok(signed) => signed,
            Err(status) => {
                return InitiateFileUploadResponse {
                    status,
                    upload_endpoint: String::new(),
                    token: None,
                    available_checksums: vec![],
                }
            }
        };

        InitiateFileUploadResponse {
            status: storage_res.status,
            upload_endpoint: endpoint,
            token: Some(token),
            available_checksums: storage_res.available_checksums,
        }
    }

    /// Signs the transfer target and points the client at the data
    /// gateway. Returns `(endpoint, token)`.
    fn sign_transfer(&self, endpoint: &str, direction: &str) -> Result<(String, String), Status> {
        let target = Url::parse(endpoint).map_err(|_| {
            Status::invalid_argument(format!("wrong format for {} endpoint", direction))
        })?;

        let token = self.signer().sign(target.as_str()).map_err(|e| {
            Status::internal(format!("error creating signature for {}: {}", direction, e))
        })?;

        Ok((self.data_gateway_endpoint().to_string(), token))
    }
}
