use std::time::Duration;

/// Пауза по умолчанию между последним нажатием и запросом
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Билет отложенной фиксации. Действителен, пока не пришёл новый ввод.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket(u64);

/// Поисковый запрос с отложенной фиксацией.
///
/// `set_query` сразу меняет отображаемое значение и выдаёт билет. Владелец
/// таймера предъявляет билет через `commit` по истечении паузы; зафиксирован
/// будет только последний ввод, более ранние билеты отклоняются.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebouncedQuery {
    pending: String,
    effective: String,
    generation: u64,
}

impl DebouncedQuery {
    pub fn new(initial: impl Into<String>) -> Self {
        let initial = initial.into();
        Self {
            pending: initial.clone(),
            effective: initial,
            generation: 0,
        }
    }

    pub fn set_query(&mut self, text: impl Into<String>) -> DebounceTicket {
        self.pending = text.into();
        self.generation += 1;
        DebounceTicket(self.generation)
    }

    /// Зафиксировать ввод по билету. Возвращает новое действующее значение,
    /// если билет последний и значение изменилось.
    pub fn commit(&mut self, ticket: DebounceTicket) -> Option<String> {
        if ticket.0 != self.generation || self.pending == self.effective {
            return None;
        }
        self.effective = self.pending.clone();
        Some(self.effective.clone())
    }

    /// Зафиксировать немедленно (очистка поля, Enter); выданные билеты сгорают
    pub fn flush(&mut self) -> Option<String> {
        self.generation += 1;
        if self.pending == self.effective {
            return None;
        }
        self.effective = self.pending.clone();
        Some(self.effective.clone())
    }

    /// Значение в поле ввода
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Значение, по которому строится запрос
    pub fn effective(&self) -> &str {
        &self.effective
    }
}
