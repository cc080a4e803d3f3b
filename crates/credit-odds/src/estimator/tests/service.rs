use std::sync::Arc;

use chrono::{Duration, Utc};

use super::common::*;
use crate::estimator::domain::{FactorKey, ProductType};
use crate::estimator::flow::FlowError;
use crate::estimator::rules::RuleTable;
use crate::estimator::session::{
    QuestionnaireService, QuestionnaireServiceError, RepositoryError, SessionId,
};

#[test]
fn start_without_product_waits_for_selection() {
    let (service, repository) = build_service();

    let view = service.start(None).expect("session opens");

    assert_eq!(view.state, "product_selection");
    assert!(view.product.is_none());
    assert!(view.current_factor.is_none());
    assert!(view.session_id.0.starts_with("qs-"));
    assert_eq!(repository.len(), 1);
}

#[test]
fn start_with_product_presents_the_first_question() {
    let (service, _) = build_service();

    let view = service.start(Some("home-loan")).expect("session opens");

    assert_eq!(view.state, "answering_factor");
    assert_eq!(view.product, Some(ProductType::HomeLoan));
    assert_eq!(view.product_label, Some("Home Loan"));
    let factor = view.current_factor.expect("first factor shown");
    assert_eq!(factor.key(), FactorKey::Age);
    assert!(!factor.options().is_empty());
    assert!(!view.can_advance);
}

#[test]
fn full_session_reaches_results() {
    let (service, repository) = build_service();
    let view = service.start(Some("credit-card")).expect("session opens");
    let id = view.session_id.clone();

    let table = RuleTable::for_product(ProductType::CreditCard);
    let mut last = view;
    for factor in table.factors {
        service.answer(&id, factor.options[0].value).expect("answer recorded");
        last = service.next(&id).expect("advances");
    }

    assert_eq!(last.state, "results");
    let result = last.result.expect("estimate attached");
    assert_eq!(result.product, ProductType::CreditCard);
    assert!(result.outcome.is_complete());
    assert_eq!(last.answers.len(), table.len());

    let stored = repository
        .records
        .lock()
        .expect("repository mutex poisoned")
        .get(&id)
        .map(|record| record.flow.estimate().is_some());
    assert_eq!(stored, Some(true));
}

#[test]
fn gated_next_leaves_stored_session_untouched() {
    let (service, _) = build_service();
    let id = service.start(Some("car-loan")).expect("session opens").session_id;

    let err = service.next(&id).expect_err("unanswered factor blocks next");

    assert!(matches!(
        err,
        QuestionnaireServiceError::Flow(FlowError::AnswerRequired(FactorKey::Age))
    ));
    let view = service.get(&id).expect("session still present");
    assert_eq!(view.progress.step, 1);
}

#[test]
fn restart_clears_a_completed_session() {
    let (service, _) = build_service();
    let id = service.start(Some("personal-loan")).expect("session opens").session_id;
    for factor in RuleTable::for_product(ProductType::PersonalLoan).factors {
        service.answer(&id, factor.options[1].value).expect("answer recorded");
        service.next(&id).expect("advances");
    }

    let view = service.restart(&id).expect("restart");

    assert_eq!(view.state, "product_selection");
    assert!(view.answers.is_empty());
    assert!(view.result.is_none());
    assert!(view.product.is_none());
}

#[test]
fn unknown_session_is_not_found() {
    let (service, _) = build_service();
    let missing = SessionId("qs-missing".to_string());

    assert!(matches!(
        service.get(&missing),
        Err(QuestionnaireServiceError::Repository(RepositoryError::NotFound))
    ));
    assert!(matches!(
        service.answer(&missing, "22-35"),
        Err(QuestionnaireServiceError::Repository(RepositoryError::NotFound))
    ));
    assert!(matches!(
        service.discard(&missing),
        Err(QuestionnaireServiceError::Repository(RepositoryError::NotFound))
    ));
}

#[test]
fn discard_removes_the_session() {
    let (service, repository) = build_service();
    let id = service.start(None).expect("session opens").session_id;

    service.discard(&id).expect("discarded");

    assert_eq!(repository.len(), 0);
}

#[test]
fn purge_drops_only_idle_sessions() {
    let (service, repository) = build_service();
    let stale = service.start(None).expect("session opens").session_id;
    let fresh = service.start(None).expect("session opens").session_id;
    repository.backdate(&stale, Utc::now() - Duration::hours(2));

    let purged = service.purge_idle(Utc::now()).expect("purge runs");

    assert_eq!(purged, 1);
    assert!(service.get(&stale).is_err());
    assert!(service.get(&fresh).is_ok());
}

#[test]
fn capacity_limit_is_reported() {
    let repository = Arc::new(MemoryRepository::with_capacity(1));
    let service = QuestionnaireService::new(repository, session_config());
    service.start(None).expect("first session fits");

    assert!(matches!(
        service.start(None),
        Err(QuestionnaireServiceError::Repository(RepositoryError::CapacityReached(1)))
    ));
}

#[test]
fn repository_outage_surfaces_as_error() {
    let service = QuestionnaireService::new(Arc::new(UnavailableRepository), session_config());

    assert!(matches!(
        service.start(Some("credit-card")),
        Err(QuestionnaireServiceError::Repository(RepositoryError::Unavailable(_)))
    ));
}

#[test]
fn one_shot_estimate_uses_lenient_product_lookup() {
    let (service, _) = build_service();
    let table = RuleTable::for_product(ProductType::CreditCard);

    let estimate = service.estimate("unknown", &best_answers(table));

    assert_eq!(estimate.product, ProductType::CreditCard);
    assert_eq!(estimate.percentage, 99);
}

#[test]
fn concurrent_steps_on_one_session_are_not_lost() {
    let (service, _) = build_service();
    let table = RuleTable::for_product(ProductType::PersonalLoan);
    let id = service.start(Some("personal-loan")).expect("session opens").session_id;
    for factor in table.factors {
        service.answer(&id, factor.options[0].value).expect("answer recorded");
        service.next(&id).expect("advances");
    }
    for _ in 0..table.len() {
        service.back(&id).expect("steps back");
    }
    assert_eq!(service.get(&id).expect("session").progress.step, 1);

    let workers = 8;
    std::thread::scope(|scope| {
        for _ in 0..workers {
            scope.spawn(|| service.next(&id).expect("every factor is answered"));
        }
    });

    let view = service.get(&id).expect("session");
    assert_eq!(view.progress.step, workers + 1);
    assert_eq!(view.answers.len(), table.len());
}

#[test]
fn rejected_step_leaves_the_stored_record_unchanged() {
    let (service, repository) = build_service();
    let id = service.start(Some("credit-card")).expect("session opens").session_id;
    let before = repository
        .records
        .lock()
        .expect("repository mutex poisoned")
        .get(&id)
        .map(|record| record.updated_at);

    service.answer(&id, "not-an-age").expect_err("unknown option");

    let after = repository
        .records
        .lock()
        .expect("repository mutex poisoned")
        .get(&id)
        .map(|record| record.updated_at);
    assert_eq!(before, after);
}

#[test]
fn purge_survives_an_oversized_ttl() {
    let repository = Arc::new(MemoryRepository::with_capacity(4));
    let config = crate::config::SessionConfig {
        ttl_minutes: 200_000_000_000,
        max_sessions: 4,
    };
    let service = QuestionnaireService::new(repository.clone(), config);
    service.start(None).expect("session opens");

    let purged = service.purge_idle(Utc::now()).expect("purge runs");

    assert_eq!(purged, 0);
    assert_eq!(repository.len(), 1);
}

#[test]
fn purge_near_the_start_of_time_keeps_sessions() {
    let (service, repository) = build_service();
    service.start(None).expect("session opens");

    let purged = service
        .purge_idle(chrono::DateTime::<Utc>::MIN_UTC)
        .expect("purge runs");

    assert_eq!(purged, 0);
    assert_eq!(repository.len(), 1);
}
