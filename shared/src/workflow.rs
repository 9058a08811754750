//! 捐赠匹配流程
//!
//! `Idle → DonorFetched → RecipientsFound → [AiMatched] → DonationCreated`
//!
//! 每一步只发出一个请求；界面在请求期间禁用对应按钮，因此这里不做并发控制。

use crate::error::{ClientError, ClientResult};
use crate::gateway::Gateway;
use crate::model::{AiRecommendation, Donation, Donor, RecordId, Recipient};
use crate::protocol::{
    CreateDonationRequest, FindRecipientsRequest, GetDonorRequest, MatchRequest,
};
use crate::request::HttpClient;
use crate::session::SessionStore;
use crate::validation::DonationForm;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Idle,
    DonorFetched,
    RecipientsFound,
    AiMatched,
    DonationCreated,
}

impl Stage {
    /// 是否可以选择接收方
    pub fn has_candidates(&self) -> bool {
        matches!(self, Stage::RecipientsFound | Stage::AiMatched)
    }
}

const NO_RECIPIENTS: &str = "No recipients found to match with AI";
const NO_RECOMMENDATION: &str = "No AI recommendation available";
const RECOMMENDATION_NOT_FOUND: &str = "Recommended recipient not found";
const RECIPIENT_NOT_FOUND: &str = "Selected recipient not found";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DonationWorkflow {
    stage: Stage,
    donor: Option<Donor>,
    donation: Option<Donation>,
    candidates: Vec<Recipient>,
    recommendation: Option<AiRecommendation>,
}

impl DonationWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn donor(&self) -> Option<&Donor> {
        self.donor.as_ref()
    }

    pub fn donation(&self) -> Option<&Donation> {
        self.donation.as_ref()
    }

    pub fn candidates(&self) -> &[Recipient] {
        &self.candidates
    }

    pub fn recommendation(&self) -> Option<&AiRecommendation> {
        self.recommendation.as_ref()
    }

    /// 推荐的接收方（必须存在于候选列表中）
    pub fn recommended_recipient(&self) -> Option<&Recipient> {
        let rec = self.recommendation.as_ref()?;
        self.find_candidate(&rec.recipient_id)
    }

    fn find_candidate(&self, id: &RecordId) -> Option<&Recipient> {
        self.candidates.iter().find(|r| &r.id == id)
    }

    /// 提交表单：获取捐赠者资料并查找候选接收方
    ///
    /// 任一步失败都回到 `Idle`。
    pub async fn submit<C: HttpClient, S: SessionStore>(
        &mut self,
        gw: &Gateway<C, S>,
        form: &DonationForm,
    ) -> ClientResult<()> {
        *self = Self::default();

        let result = self.find_recipients(gw, form).await;
        if let Err(err) = &result {
            log::warn!("donation submit failed: {}", err);
            *self = Self::default();
        }
        result
    }

    async fn find_recipients<C: HttpClient, S: SessionStore>(
        &mut self,
        gw: &Gateway<C, S>,
        form: &DonationForm,
    ) -> ClientResult<()> {
        if gw.store().donor_id().is_none() {
            return Err(ClientError::MissingIdentity("Donor ID"));
        }

        let donor = gw.send(&GetDonorRequest).await?;
        self.donor = Some(donor.clone());
        self.stage = Stage::DonorFetched;

        let donation = form.validate()?;
        self.donation = Some(donation.clone());

        let candidates = gw
            .send(&FindRecipientsRequest { donor, donation })
            .await?;
        log::info!("found {} candidate recipients", candidates.len());

        self.candidates = candidates;
        self.stage = Stage::RecipientsFound;
        Ok(())
    }

    /// 请求 AI 推荐；失败时保持当前阶段
    pub async fn request_ai_match<C: HttpClient, S: SessionStore>(
        &mut self,
        gw: &Gateway<C, S>,
    ) -> ClientResult<()> {
        if !self.stage.has_candidates() || self.candidates.is_empty() {
            return Err(ClientError::InvalidStep(NO_RECIPIENTS));
        }
        let (Some(donor), Some(donation)) = (&self.donor, &self.donation) else {
            return Err(ClientError::InvalidStep(NO_RECIPIENTS));
        };

        let req = MatchRequest::new(donor, donation, &self.candidates);
        let recommendation = gw.send(&req).await?;
        log::info!(
            "AI recommended recipient {} ({})",
            recommendation.recipient_id,
            recommendation.recipient_name
        );

        self.recommendation = Some(recommendation);
        self.stage = Stage::AiMatched;
        Ok(())
    }

    /// 选择接收方并创建捐赠记录
    ///
    /// 成功后清空全部状态；失败时保持之前的阶段。
    pub async fn select_recipient<C: HttpClient, S: SessionStore>(
        &mut self,
        gw: &Gateway<C, S>,
        recipient_id: &RecordId,
    ) -> ClientResult<()> {
        if !self.stage.has_candidates() {
            return Err(ClientError::InvalidStep(RECIPIENT_NOT_FOUND));
        }
        let (Some(donor), Some(donation)) = (&self.donor, &self.donation) else {
            return Err(ClientError::InvalidStep(RECIPIENT_NOT_FOUND));
        };
        let recipient = self
            .find_candidate(recipient_id)
            .ok_or(ClientError::InvalidStep(RECIPIENT_NOT_FOUND))?;

        let req = CreateDonationRequest {
            donor: donor.clone(),
            donation: donation.clone(),
            recipient: recipient.into(),
        };
        gw.send(&req).await?;
        log::info!("donation created for recipient {}", recipient_id);

        *self = Self {
            stage: Stage::DonationCreated,
            ..Self::default()
        };
        Ok(())
    }

    /// 接受 AI 推荐
    pub async fn accept_recommendation<C: HttpClient, S: SessionStore>(
        &mut self,
        gw: &Gateway<C, S>,
    ) -> ClientResult<()> {
        let rec = self
            .recommendation
            .as_ref()
            .ok_or(ClientError::InvalidStep(NO_RECOMMENDATION))?;
        let recipient_id = self
            .find_candidate(&rec.recipient_id)
            .map(|r| r.id.clone())
            .ok_or(ClientError::InvalidStep(RECOMMENDATION_NOT_FOUND))?;

        self.select_recipient(gw, &recipient_id).await
    }
}
