//! Issue requests report

use crate::{
    error::AppResult,
    models::request::{IssueRequest, IssueRequestDetails},
    repository::Repository,
};

#[derive(Clone)]
pub struct RequestsService {
    repository: Repository,
}

impl RequestsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All requests with member and title resolved
    pub async fn list(&self) -> AppResult<Vec<IssueRequestDetails>> {
        let requests = self.repository.requests.list().await?;
        let members = self.repository.memberships.list().await?;
        let items = self.repository.items.list().await?;

        Ok(requests
            .into_iter()
            .map(|request: IssueRequest| {
                let member = members.iter().find(|m| m.id == request.member_id);
                let item = items.iter().find(|i| i.id == request.item_id);
                IssueRequestDetails {
                    id: request.id,
                    membership_number: member.map(|m| m.membership_number.clone()),
                    member_name: member.map(|m| m.full_name()),
                    item_name: item.map(|i| i.name.clone()),
                    request_date: request.request_date,
                    fulfilled_date: request.fulfilled_date,
                    status: request.status,
                }
            })
            .collect())
    }
}
