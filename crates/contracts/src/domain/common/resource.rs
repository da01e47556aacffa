use super::validation::EntityForm;
use serde::de::DeserializeOwned;

/// REST-ресурс одной сущности.
///
/// Все сущности бэкенда устроены одинаково:
/// - `GET    {path}?search=...` - список строк (`Item`)
/// - `GET    {path}/{id}`       - детальная модель (`Detail`)
/// - `POST   {path}`            - создание из `Form::Payload`
/// - `PUT    {path}/{id}`       - обновление из `Form::Payload`
/// - `DELETE {path}/{id}`       - удаление
pub trait Resource: 'static {
    /// Строка списка
    type Item: DeserializeOwned + Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static;

    /// Детальная модель (может содержать денормализованное имя родителя)
    type Detail: DeserializeOwned + Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static;

    /// Форма создания/редактирования
    type Form: EntityForm;

    /// Индекс сущности, используется как ключ вкладки и префикс id страниц
    fn aggregate_index() -> &'static str;

    /// Путь коллекции относительно базового URL API, например `/api/Brands`
    fn collection_path() -> &'static str;

    /// Имя элемента в винительном падеже ("бренд", "город")
    fn element_name() -> &'static str;

    /// Заголовок списка
    fn list_name() -> &'static str;

    fn item_id(item: &Self::Item) -> &str;

    /// Подпись элемента для пикеров и диалога удаления
    fn item_label(item: &Self::Item) -> &str;

    /// Заполнить форму редактирования из загруженной детальной модели
    fn form_from_detail(detail: &Self::Detail) -> Self::Form;

    /// Путь к конкретной записи
    fn element_path(id: &str) -> String {
        format!("{}/{}", Self::collection_path(), id)
    }
}
