use super::{addr, create_dinner_bill, create_pot_bill, create_test_service};
use crate::core::constants::{BILL_SETTLED, PAYMENT_RECORDED, PAYMENT_REJECTED};
use crate::core::errors::SplitBillError;
use crate::core::models::{Amount, BillStatus, LedgerEvent};

#[tokio::test]
async fn test_pay_share() {
    let service = create_test_service();
    let index = create_dinner_bill(&service).await;
    let before = service.get_bill(index).await.unwrap();

    service.pay_share(index, &addr("0xB"), Amount::new(50)).await.unwrap();

    let after = service.get_bill(index).await.unwrap();
    assert!(after.shares[1].paid);
    assert_eq!(after.shares[0], before.shares[0]);
    assert_eq!(after.shares[2], before.shares[2]);
    assert_eq!(after.status(), BillStatus::PartiallyPaid);
}

#[tokio::test]
async fn test_pay_share_twice() {
    let service = create_test_service();
    let index = create_dinner_bill(&service).await;

    service.pay_share(index, &addr("0xB"), Amount::new(50)).await.unwrap();
    let again = service.pay_share(index, &addr("0xB"), Amount::new(50)).await;
    assert!(matches!(again, Err(SplitBillError::AlreadyPaid(_))));
}

#[tokio::test]
async fn test_pay_share_amount_mismatch() {
    let service = create_test_service();
    let index = create_dinner_bill(&service).await;

    let result = service.pay_share(index, &addr("0xC"), Amount::new(49)).await;
    assert!(matches!(
        result,
        Err(SplitBillError::AmountMismatch { expected, sent }) if expected == "50" && sent == "49"
    ));
    assert!(!service.get_bill(index).await.unwrap().shares[2].paid);
}

#[tokio::test]
async fn test_pay_share_unknown_payer_and_bill() {
    let service = create_test_service();
    let index = create_dinner_bill(&service).await;

    let stranger = service.pay_share(index, &addr("0xD"), Amount::new(50)).await;
    assert!(matches!(stranger, Err(SplitBillError::UnauthorizedPayer(_))));

    let missing = service.pay_share(index + 1, &addr("0xB"), Amount::new(50)).await;
    assert!(matches!(missing, Err(SplitBillError::BillNotFound(_))));
}

#[tokio::test]
async fn test_payer_address_is_case_insensitive() {
    let service = create_test_service();
    let index = service
        .create_bill(
            vec!["Alice".to_string(), "Bob".to_string()],
            vec![addr("0xAbCdEf"), addr("0x12aB")],
            vec![Amount::new(10), Amount::new(5)],
        )
        .await
        .unwrap();

    service.pay_share(index, &addr("0X12AB"), Amount::new(5)).await.unwrap();
    assert!(service.get_bill(index).await.unwrap().is_fully_settled());
}

#[tokio::test]
async fn test_creditor_cannot_pay_own_share() {
    let service = create_test_service();
    let index = create_dinner_bill(&service).await;

    let result = service.pay_share(index, &addr("0xA"), Amount::new(100)).await;
    assert!(matches!(result, Err(SplitBillError::AlreadyPaid(_))));
}

#[tokio::test]
async fn test_fully_settled_is_terminal() {
    let service = create_test_service();
    let index = create_pot_bill(&service, &[30, 70]).await;

    service.pay_share(index, &addr("0x0000"), Amount::new(30)).await.unwrap();
    assert_eq!(service.get_bill(index).await.unwrap().status(), BillStatus::PartiallyPaid);
    service.pay_share(index, &addr("0x0001"), Amount::new(70)).await.unwrap();
    assert_eq!(service.get_bill(index).await.unwrap().status(), BillStatus::FullySettled);

    for (payer, amount) in [("0x0000", 30), ("0x0001", 70)] {
        let result = service.pay_share(index, &addr(payer), Amount::new(amount)).await;
        assert!(matches!(result, Err(SplitBillError::AlreadyPaid(_))));
    }
    assert_eq!(service.get_bill(index).await.unwrap().status(), BillStatus::FullySettled);
}

#[tokio::test]
async fn test_payments_are_audited() {
    let service = create_test_service();
    let index = create_dinner_bill(&service).await;

    let _ = service.pay_share(index, &addr("0xB"), Amount::new(1)).await;
    service.pay_share(index, &addr("0xB"), Amount::new(50)).await.unwrap();
    service.pay_share(index, &addr("0xC"), Amount::new(50)).await.unwrap();

    let actions: Vec<String> = service
        .get_bill_audits(index)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.action)
        .collect();
    assert_eq!(
        actions[1..],
        [PAYMENT_REJECTED, PAYMENT_RECORDED, PAYMENT_RECORDED, BILL_SETTLED]
    );

    let audits = service.get_bill_audits(index).await.unwrap();
    assert_eq!(audits[2].actor.as_deref(), Some("0xB"));
}

#[tokio::test]
async fn test_payments_are_published() {
    let service = create_test_service();
    let index = create_dinner_bill(&service).await;
    let mut events = service.subscribe();

    service.pay_share(index, &addr("0xB"), Amount::new(50)).await.unwrap();
    service.pay_share(index, &addr("0xC"), Amount::new(50)).await.unwrap();

    assert_eq!(
        events.recv().await.unwrap(),
        LedgerEvent::PaymentRecorded {
            bill_index: index,
            payer: addr("0xB"),
            amount: Amount::new(50),
            fully_settled: false,
        }
    );
    assert!(matches!(
        events.recv().await.unwrap(),
        LedgerEvent::PaymentRecorded { fully_settled: true, .. }
    ));
}
